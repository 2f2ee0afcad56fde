//! Filesystem-backed BlobStore implementation

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use siteloom_core::{
    blob_store::{gallery_prefix, BlobStore},
    Error, Result, TenantId,
};

use crate::validate_blob_id;

/// Filesystem blob store.
///
/// Lays assets out as `<root>/tenants/<tenant_id>/gallery/<blob_id>` and maps
/// them to `<public_base_url>/tenants/<tenant_id>/gallery/<blob_id>`, the
/// shape a fronting static-file server or CDN exposes. Writes go through a
/// temp file and rename so a crashed upload never leaves a half-written
/// object at a committed URL.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    /// Create a store rooted at `root`.
    ///
    /// # Errors
    /// - `Error::Io` if the root directory cannot be created
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        info!("Initialized LocalBlobStore at {:?}", root);
        Ok(Self {
            root,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn blob_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Write atomically: temp file in the target directory, then rename.
    async fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::Blob(format!("blob path {:?} has no parent", path)))?;
        tokio::fs::create_dir_all(parent).await?;

        let mut temp = path.as_os_str().to_owned();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        tokio::fs::write(&temp, data).await?;
        if let Err(e) = tokio::fs::rename(&temp, path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(Error::Io(e));
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn allocate(&self, tenant_id: TenantId) -> String {
        gallery_prefix(tenant_id)
    }

    async fn commit(&self, tenant_id: TenantId, blob_id: &str, data: Bytes) -> Result<String> {
        validate_blob_id(blob_id)?;

        let relative = format!("{}/{}", gallery_prefix(tenant_id), blob_id);
        let path = self.blob_path(&relative);
        Self::write_atomic(&path, &data).await?;

        debug!(tenant_id = %tenant_id, blob_id, "committed gallery blob");
        Ok(format!("{}/{}", self.public_base_url, relative))
    }

    async fn release(&self, tenant_id: TenantId, url: &str) -> Result<()> {
        let prefix = format!("{}/{}/", self.public_base_url, gallery_prefix(tenant_id));
        let Some(blob_id) = url.strip_prefix(&prefix) else {
            return Err(Error::Validation(format!(
                "url '{}' is outside tenant {}'s namespace",
                url, tenant_id
            )));
        };
        validate_blob_id(blob_id)?;

        let path = self.blob_path(&format!("{}/{}", gallery_prefix(tenant_id), blob_id));
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(tenant_id = %tenant_id, blob_id, "released gallery blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::NotFound),
            Err(e) => Err(Error::Io(e)),
        }
    }
}
