//! Blob reference management backends
//!
//! Tenant-namespaced asset storage behind the `BlobStore` trait:
//! - `MemoryBlobStore`: in-process map (dev and tests)
//! - `LocalBlobStore`: filesystem layout served by a fronting static server

mod local_blob;
mod memory_blob;

pub use local_blob::LocalBlobStore;
pub use memory_blob::MemoryBlobStore;

use siteloom_core::{Error, Result};

/// Validate a blob identifier before it becomes part of a storage path.
///
/// Rejects traversal sequences and path separators; allows the shapes real
/// upload names reduce to (alphanumeric, dash, underscore, dot).
pub(crate) fn validate_blob_id(blob_id: &str) -> Result<()> {
    if blob_id.is_empty() {
        return Err(Error::Validation("blob id cannot be empty".to_string()));
    }
    if blob_id.len() > 255 {
        return Err(Error::Validation(format!(
            "blob id too long: {} chars (max 255)",
            blob_id.len()
        )));
    }
    if blob_id.contains("..") || blob_id.contains('/') || blob_id.contains('\\') {
        return Err(Error::Validation(format!(
            "invalid blob id '{}': contains path traversal characters",
            blob_id
        )));
    }
    let is_valid = blob_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !is_valid {
        return Err(Error::Validation(format!(
            "invalid blob id '{}': only alphanumeric, dash, underscore, and dot allowed",
            blob_id
        )));
    }
    Ok(())
}
