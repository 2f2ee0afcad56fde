//! In-memory BlobStore implementation

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use siteloom_core::{
    blob_store::{gallery_prefix, BlobStore},
    Error, Result, TenantId,
};

use crate::validate_blob_id;

/// In-memory blob store for development and tests.
///
/// Keys committed blobs by their public URL, which keeps the release-side
/// namespace check identical to the filesystem backend's.
#[derive(Debug)]
pub struct MemoryBlobStore {
    public_base_url: String,
    blobs: DashMap<String, Bytes>,
}

impl MemoryBlobStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            blobs: DashMap::new(),
        }
    }

    /// Whether a committed URL still has a backing blob.
    pub fn contains(&self, url: &str) -> bool {
        self.blobs.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("https://assets.invalid")
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn allocate(&self, tenant_id: TenantId) -> String {
        gallery_prefix(tenant_id)
    }

    async fn commit(&self, tenant_id: TenantId, blob_id: &str, data: Bytes) -> Result<String> {
        validate_blob_id(blob_id)?;
        let url = format!(
            "{}/{}/{}",
            self.public_base_url,
            gallery_prefix(tenant_id),
            blob_id
        );
        self.blobs.insert(url.clone(), data);
        Ok(url)
    }

    async fn release(&self, tenant_id: TenantId, url: &str) -> Result<()> {
        let prefix = format!("{}/{}/", self.public_base_url, gallery_prefix(tenant_id));
        if !url.starts_with(&prefix) {
            return Err(Error::Validation(format!(
                "url '{}' is outside tenant {}'s namespace",
                url, tenant_id
            )));
        }
        self.blobs.remove(url).ok_or(Error::NotFound)?;
        Ok(())
    }
}
