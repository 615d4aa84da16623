//! Serde helpers for LIMS payloads.
//!
//! The LIMS emits explicit `null` for unset scalars and lists. These helpers decode
//! a `null` the same way as an absent field.

use serde::{Deserialize, Deserializer};

pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
