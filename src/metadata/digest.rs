//! Content hashes of metadata payloads.

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::TableMetadata;

/// SHA-256 of a value's JSON serialization, as lowercase hex.
pub fn compute_hash<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(value)?;
    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Digest of an assembled payload. Equal inputs give equal digests, which
/// lets clients and caches compare metadata without diffing it.
pub fn metadata_digest(metadata: &TableMetadata) -> Result<String, serde_json::Error> {
    compute_hash(metadata)
}
