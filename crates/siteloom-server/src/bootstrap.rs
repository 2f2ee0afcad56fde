//! Backend bootstrap
//!
//! Turns the loaded configuration into wired application state: store and
//! blob backends behind their trait objects, the host resolver, and the
//! service stack.

use std::sync::Arc;
use tracing::info;

use siteloom_blob::{LocalBlobStore, MemoryBlobStore};
use siteloom_core::{site_store::BookingStore, BlobStore, Error, Result, SiteStore};
use siteloom_ingress::SiteState;
use siteloom_routing::HostResolver;
use siteloom_store_memory::MemorySiteStore;
use siteloom_store_postgres::PostgresSiteStore;

use crate::config::{ServerConfig, StoreBackend};

/// Build the application state from configuration.
pub async fn build_state(config: &ServerConfig) -> Result<SiteState> {
    let (site_store, booking_store): (Arc<dyn SiteStore>, Arc<dyn BookingStore>) =
        match config.store.backend {
            StoreBackend::Memory => {
                info!("using in-memory site store");
                let store = Arc::new(MemorySiteStore::new());
                (store.clone(), store)
            }
            StoreBackend::Postgres => {
                let url = config.store.database_url.as_deref().ok_or_else(|| {
                    Error::Config(
                        "store.database_url is required for the postgres backend".to_string(),
                    )
                })?;
                info!("using postgres site store");
                let store = Arc::new(PostgresSiteStore::new(url).await?);
                (store.clone(), store)
            }
        };

    let blob_store: Arc<dyn BlobStore> = match &config.blob.root_dir {
        Some(root) => {
            info!(root = ?root, "using filesystem blob store");
            Arc::new(LocalBlobStore::new(root, &config.blob.public_base_url)?)
        }
        None => {
            info!("using in-memory blob store");
            Arc::new(MemoryBlobStore::new(&config.blob.public_base_url))
        }
    };

    let resolver = HostResolver::new(&config.main_hosts);

    Ok(SiteState::new(
        resolver,
        site_store,
        booking_store,
        blob_store,
    ))
}
