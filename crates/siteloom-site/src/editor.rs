//! Owner-facing site editing service
//!
//! All mutations to a tenant's site funnel through here: validated content
//! saves (provisioning on the first one), publish/unpublish toggles, and
//! gallery add/remove with blob lifecycle ordering. List-mutating operations
//! for one tenant serialize through a per-tenant lock; operations across
//! different tenants need no coordination.

use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use siteloom_core::{
    site_store::SiteStore, BlobStore, ContentUpdate, Error, Result, SiteRecord, Subdomain,
    TenantId,
};

use crate::assembly::SiteAssembly;
use crate::publication::PublicationState;

/// One full editor save: the complete content submission plus the identity
/// needed to provision on first save.
#[derive(Debug, Clone)]
pub struct SaveContentRequest {
    pub subdomain: Subdomain,
    pub template_id: String,
    pub content: ContentUpdate,
}

pub struct SiteEditor {
    store: Arc<dyn SiteStore>,
    blobs: Arc<dyn BlobStore>,
    assembly: Arc<SiteAssembly>,
    /// Per-tenant single-flight locks for list-mutating operations.
    locks: DashMap<TenantId, Arc<Mutex<()>>>,
}

impl SiteEditor {
    pub fn new(
        store: Arc<dyn SiteStore>,
        blobs: Arc<dyn BlobStore>,
        assembly: Arc<SiteAssembly>,
    ) -> Self {
        Self {
            store,
            blobs,
            assembly,
            locks: DashMap::new(),
        }
    }

    fn lock_for(&self, tenant_id: TenantId) -> Arc<Mutex<()>> {
        self.locks
            .entry(tenant_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Current publication state for a tenant.
    pub async fn state(&self, tenant_id: TenantId) -> Result<PublicationState> {
        match self.store.get(tenant_id).await {
            Ok(record) => Ok(PublicationState::of(Some(&record))),
            Err(Error::NotFound) => Ok(PublicationState::Unprovisioned),
            Err(e) => Err(e),
        }
    }

    /// The tenant's own record, for the editor surface.
    pub async fn site(&self, tenant_id: TenantId) -> Result<SiteRecord> {
        self.store.get(tenant_id).await
    }

    /// Persist a full save submission.
    ///
    /// Provisions the site record (Draft state) on the first save; merges on
    /// later saves. Last write wins at the granularity of a full submission -
    /// there is no optimistic-locking token.
    ///
    /// # Errors
    /// - `Error::Validation` before anything reaches the store
    /// - `Error::Conflict` if provisioning collides on the subdomain
    pub async fn save_content(
        &self,
        tenant_id: TenantId,
        request: SaveContentRequest,
    ) -> Result<SiteRecord> {
        let lock = self.lock_for(tenant_id);
        let _guard = lock.lock().await;

        let record = match self.store.get(tenant_id).await {
            Ok(_) => {
                request.content.validate()?;
                self.store
                    .upsert_content(tenant_id, request.content)
                    .await?
            }
            Err(Error::NotFound) => {
                let content = request.content.into_content();
                content.validate()?;
                info!(tenant_id = %tenant_id, subdomain = %request.subdomain, "provisioning site on first save");
                self.store
                    .create(tenant_id, request.subdomain, request.template_id, content)
                    .await?
            }
            Err(e) => return Err(e),
        };

        self.assembly.invalidate(record.subdomain.as_str());
        Ok(record)
    }

    /// Make the tenant's current content publicly visible.
    ///
    /// Idempotent: publishing an already-published site is a no-op success.
    ///
    /// # Errors
    /// - `Error::NotFound` if the tenant is unprovisioned
    pub async fn publish(&self, tenant_id: TenantId) -> Result<SiteRecord> {
        let record = self.store.set_published(tenant_id, true).await?;
        self.assembly.invalidate(record.subdomain.as_str());
        info!(tenant_id = %tenant_id, subdomain = %record.subdomain, "site published");
        Ok(record)
    }

    /// Withdraw the site from public view. Content is untouched; publishing
    /// again restores the same content. Idempotent.
    pub async fn unpublish(&self, tenant_id: TenantId) -> Result<SiteRecord> {
        let record = self.store.set_published(tenant_id, false).await?;
        self.assembly.invalidate(record.subdomain.as_str());
        info!(tenant_id = %tenant_id, subdomain = %record.subdomain, "site unpublished");
        Ok(record)
    }

    /// Upload a gallery asset and append its committed URL to the gallery.
    ///
    /// Returns the updated record and the new URL.
    pub async fn add_gallery_image(
        &self,
        tenant_id: TenantId,
        file_name: &str,
        data: Bytes,
    ) -> Result<(SiteRecord, String)> {
        let lock = self.lock_for(tenant_id);
        let _guard = lock.lock().await;

        let record = self.store.get(tenant_id).await?;

        let blob_id = match file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => format!("{}.{}", Uuid::new_v4(), ext),
            _ => Uuid::new_v4().to_string(),
        };
        let url = self.blobs.commit(tenant_id, &blob_id, data).await?;

        let mut gallery = record.content.gallery.clone();
        gallery.push(url.clone());
        let update = ContentUpdate {
            gallery: Some(gallery),
            ..Default::default()
        };

        let record = match self.store.upsert_content(tenant_id, update).await {
            Ok(record) => record,
            Err(e) => {
                // The URL never made it into the gallery; drop the blob so it
                // does not dangle. An orphaned blob is tolerable, so a failed
                // cleanup only warns.
                if let Err(release_err) = self.blobs.release(tenant_id, &url).await {
                    warn!(tenant_id = %tenant_id, url, "failed to release uncommitted gallery blob: {}", release_err);
                }
                return Err(e);
            }
        };

        self.assembly.invalidate(record.subdomain.as_str());
        Ok((record, url))
    }

    /// Remove a gallery entry and release its backing blob.
    ///
    /// Ordering is load-bearing: the URL is removed from the persisted list
    /// and confirmed first, then the blob is released. The only reachable
    /// partial state is blob-retained, which is benign; URL-retained with the
    /// blob gone would produce broken public images and cannot happen here.
    ///
    /// # Errors
    /// - `Error::NotFound` if the tenant is unprovisioned or the URL is not
    ///   in the gallery
    pub async fn remove_gallery_image(&self, tenant_id: TenantId, url: &str) -> Result<SiteRecord> {
        let lock = self.lock_for(tenant_id);
        let _guard = lock.lock().await;

        let record = self.store.get(tenant_id).await?;
        if !record.content.gallery.iter().any(|u| u == url) {
            return Err(Error::NotFound);
        }

        let gallery: Vec<String> = record
            .content
            .gallery
            .iter()
            .filter(|u| u.as_str() != url)
            .cloned()
            .collect();
        let update = ContentUpdate {
            gallery: Some(gallery),
            ..Default::default()
        };
        let record = self.store.upsert_content(tenant_id, update).await?;
        self.assembly.invalidate(record.subdomain.as_str());

        // List removal is persisted; a release failure leaves an orphaned
        // blob, which is the tolerated direction.
        if let Err(e) = self.blobs.release(tenant_id, url).await {
            warn!(tenant_id = %tenant_id, url, "failed to release gallery blob: {}", e);
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteloom_blob::MemoryBlobStore;
    use siteloom_core::Service;
    use siteloom_store_memory::MemorySiteStore;

    struct Fixture {
        store: Arc<MemorySiteStore>,
        blobs: Arc<MemoryBlobStore>,
        assembly: Arc<SiteAssembly>,
        editor: SiteEditor,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemorySiteStore::new());
        let blobs = Arc::new(MemoryBlobStore::default());
        let assembly = Arc::new(SiteAssembly::new(store.clone()));
        let editor = SiteEditor::new(store.clone(), blobs.clone(), assembly.clone());
        Fixture {
            store,
            blobs,
            assembly,
            editor,
        }
    }

    fn save_request() -> SaveContentRequest {
        SaveContentRequest {
            subdomain: Subdomain::new("bellas").unwrap(),
            template_id: "classic".to_string(),
            content: ContentUpdate {
                business_name: Some("Bella's Beauty Studio".to_string()),
                services: Some(vec![
                    Service {
                        name: "Signature Facial".to_string(),
                        description: String::new(),
                        duration: "60 min".to_string(),
                        price: 95.0,
                    },
                    Service {
                        name: "Brow Shaping".to_string(),
                        description: String::new(),
                        duration: "30 min".to_string(),
                        price: 40.0,
                    },
                ]),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_first_save_provisions_draft() {
        let f = fixture();
        let tenant_id = TenantId::new();

        assert_eq!(
            f.editor.state(tenant_id).await.unwrap(),
            PublicationState::Unprovisioned
        );
        let record = f.editor.save_content(tenant_id, save_request()).await.unwrap();
        assert!(!record.is_published);
        assert_eq!(
            f.editor.state(tenant_id).await.unwrap(),
            PublicationState::Draft
        );
    }

    #[tokio::test]
    async fn test_first_save_requires_business_name() {
        let f = fixture();
        let mut request = save_request();
        request.content.business_name = None;

        let result = f.editor.save_content(TenantId::new(), request).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_publish_unpublish_round_trip_preserves_content() {
        let f = fixture();
        let tenant_id = TenantId::new();
        f.editor.save_content(tenant_id, save_request()).await.unwrap();

        let published = f.editor.publish(tenant_id).await.unwrap();
        assert!(published.is_published);
        let view = f.assembly.assemble("bellas").await.unwrap();
        assert_eq!(view.content.services.len(), 2);

        f.editor.unpublish(tenant_id).await.unwrap();
        assert!(matches!(
            f.assembly.assemble("bellas").await,
            Err(Error::NotPublished)
        ));

        let republished = f.editor.publish(tenant_id).await.unwrap();
        assert_eq!(republished.content.services.len(), 2);
        let view = f.assembly.assemble("bellas").await.unwrap();
        assert_eq!(view.content.services.len(), 2);
    }

    #[tokio::test]
    async fn test_publish_unprovisioned_is_not_found() {
        let f = fixture();
        assert!(matches!(
            f.editor.publish(TenantId::new()).await,
            Err(Error::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_publish_twice_is_idempotent() {
        let f = fixture();
        let tenant_id = TenantId::new();
        f.editor.save_content(tenant_id, save_request()).await.unwrap();

        let once = f.editor.publish(tenant_id).await.unwrap();
        let twice = f.editor.publish(tenant_id).await.unwrap();
        assert_eq!(once.is_published, twice.is_published);
        assert_eq!(once.updated_at, twice.updated_at);
    }

    #[tokio::test]
    async fn test_edit_while_published_is_immediately_public() {
        let f = fixture();
        let tenant_id = TenantId::new();
        f.editor.save_content(tenant_id, save_request()).await.unwrap();
        f.editor.publish(tenant_id).await.unwrap();
        f.assembly.assemble("bellas").await.unwrap();

        let mut request = save_request();
        request.content.tagline = Some("Now with lash lifts".to_string());
        f.editor.save_content(tenant_id, request).await.unwrap();

        let view = f.assembly.assemble("bellas").await.unwrap();
        assert_eq!(view.content.tagline, "Now with lash lifts");
    }

    #[tokio::test]
    async fn test_gallery_add_then_remove_releases_blob() {
        let f = fixture();
        let tenant_id = TenantId::new();
        f.editor.save_content(tenant_id, save_request()).await.unwrap();

        let (record, url) = f
            .editor
            .add_gallery_image(tenant_id, "studio.jpg", Bytes::from_static(b"jpeg"))
            .await
            .unwrap();
        assert_eq!(record.content.gallery, vec![url.clone()]);
        assert!(f.blobs.contains(&url));

        let record = f.editor.remove_gallery_image(tenant_id, &url).await.unwrap();
        assert!(record.content.gallery.is_empty());
        assert!(!f.blobs.contains(&url));
    }

    #[tokio::test]
    async fn test_remove_unknown_gallery_url_is_not_found() {
        let f = fixture();
        let tenant_id = TenantId::new();
        f.editor.save_content(tenant_id, save_request()).await.unwrap();

        let result = f
            .editor
            .remove_gallery_image(tenant_id, "https://assets.invalid/nope.jpg")
            .await;
        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn test_concurrent_saves_last_write_wins() {
        let f = fixture();
        let tenant_id = TenantId::new();
        f.editor.save_content(tenant_id, save_request()).await.unwrap();

        let list_a = vec![Service {
            name: "List A Facial".to_string(),
            description: String::new(),
            duration: "60 min".to_string(),
            price: 90.0,
        }];
        let list_b = vec![
            Service {
                name: "List B Peel".to_string(),
                description: String::new(),
                duration: "45 min".to_string(),
                price: 120.0,
            },
            Service {
                name: "List B Massage".to_string(),
                description: String::new(),
                duration: "90 min".to_string(),
                price: 150.0,
            },
        ];

        let editor = Arc::new(f.editor);
        let mut handles = Vec::new();
        for services in [list_a.clone(), list_b.clone()] {
            let editor = editor.clone();
            handles.push(tokio::spawn(async move {
                let request = SaveContentRequest {
                    subdomain: Subdomain::new("bellas").unwrap(),
                    template_id: "classic".to_string(),
                    content: ContentUpdate {
                        services: Some(services),
                        ..Default::default()
                    },
                };
                editor.save_content(tenant_id, request).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // The stored list is exactly one of the two submissions, never a
        // merged hybrid.
        let stored = f.store.get(tenant_id).await.unwrap().content.services;
        assert!(stored == list_a || stored == list_b);
    }
}
