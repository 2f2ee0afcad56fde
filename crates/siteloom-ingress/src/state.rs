//! Shared application state with dependency-injected services

use std::sync::Arc;

use siteloom_core::{site_store::BookingStore, BlobStore, SiteStore};
use siteloom_routing::HostResolver;
use siteloom_site::{BookingService, SiteAssembly, SiteEditor};

/// Application state handed to every handler via axum's state management.
///
/// Built once at startup from the configured backends; the same wiring works
/// over the in-memory and PostgreSQL stores.
#[derive(Clone)]
pub struct SiteState {
    pub resolver: Arc<HostResolver>,
    pub assembly: Arc<SiteAssembly>,
    pub editor: Arc<SiteEditor>,
    pub bookings: Arc<BookingService>,
}

impl SiteState {
    /// Wire the full service stack from stores and a resolver.
    pub fn new(
        resolver: HostResolver,
        site_store: Arc<dyn SiteStore>,
        booking_store: Arc<dyn BookingStore>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        let assembly = Arc::new(SiteAssembly::new(site_store.clone()));
        let editor = Arc::new(SiteEditor::new(
            site_store.clone(),
            blob_store,
            assembly.clone(),
        ));
        let bookings = Arc::new(BookingService::new(site_store, booking_store));
        Self {
            resolver: Arc::new(resolver),
            assembly,
            editor,
            bookings,
        }
    }
}
