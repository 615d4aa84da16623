//! LIMS adapter
//!
//! HTTP access to the laboratory LIMS: requests, sample manifests and deliveries.

pub mod client;

pub use client::{LimsApi, LimsHttpClient};
