//! Blob store trait
//!
//! Allocates tenant-namespaced storage paths for uploaded assets and tracks
//! the committed public URLs referenced from a site's gallery. Wraps the
//! external binary object store.

use async_trait::async_trait;
use bytes::Bytes;

use crate::tenant::TenantId;
use crate::Result;

/// Tenant-namespaced asset storage.
///
/// Paths are namespaced per tenant so no tenant can overwrite or enumerate
/// another tenant's assets; `release` must reject URLs outside the caller's
/// namespace.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// The storage path prefix under which this tenant's assets live.
    fn allocate(&self, tenant_id: TenantId) -> String;

    /// Persist an asset and return its committed public URL.
    ///
    /// # Errors
    /// - `Error::Blob` on write failure
    /// - `Error::Upstream` if the backing store is unreachable
    async fn commit(&self, tenant_id: TenantId, blob_id: &str, data: Bytes) -> Result<String>;

    /// Remove the backing object for a committed URL.
    ///
    /// Called after the URL has been removed from the persisted gallery list,
    /// never before, so a failure here leaves an orphaned blob rather than a
    /// broken public image.
    ///
    /// # Errors
    /// - `Error::Validation` if the URL is outside the tenant's namespace
    /// - `Error::NotFound` if the object is already gone
    async fn release(&self, tenant_id: TenantId, url: &str) -> Result<()>;
}

/// Storage path prefix for a tenant's gallery assets.
///
/// Shared by implementations so the namespace check in `release` and the
/// path layout in `commit` cannot drift apart.
pub fn gallery_prefix(tenant_id: TenantId) -> String {
    format!("tenants/{}/gallery", tenant_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_prefix_is_tenant_namespaced() {
        let a = TenantId::new();
        let b = TenantId::new();
        assert_ne!(gallery_prefix(a), gallery_prefix(b));
        assert!(gallery_prefix(a).starts_with("tenants/"));
    }
}
