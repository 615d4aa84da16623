//! Canonical wire format
//!
//! Records leave the process as validated `rkyv` archives of
//! [`RequestWithManifests`]. Consumers decode with [`decode_record`], which checks
//! the archive before touching it.

use crate::domain::{PublisherError, RequestWithManifests, Result};
use rkyv::Deserialize;

/// Encode a record into its canonical binary form
pub fn encode_record(record: &RequestWithManifests) -> Result<Vec<u8>> {
    rkyv::to_bytes::<_, 1024>(record)
        .map(|bytes| bytes.into_vec())
        .map_err(|e| {
            PublisherError::Serialization(format!(
                "Failed to encode request {}: {}",
                record.request_id, e
            ))
        })
}

/// Decode and validate a record produced by [`encode_record`]
pub fn decode_record(bytes: &[u8]) -> Result<RequestWithManifests> {
    // Archives must be read from aligned memory.
    let mut aligned = rkyv::AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    let archived = rkyv::check_archived_root::<RequestWithManifests>(&aligned)
        .map_err(|e| PublisherError::Serialization(format!("Invalid record archive: {e}")))?;

    let record: RequestWithManifests = archived
        .deserialize(&mut rkyv::Infallible)
        .map_err(|e: std::convert::Infallible| PublisherError::Serialization(e.to_string()))?;
    Ok(record)
}
