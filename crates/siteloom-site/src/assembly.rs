//! Site assembly service
//!
//! Composes the externally-visible representation of a tenant's site from its
//! stored record, gated on publication state. The only read path visitors
//! ever hit.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use siteloom_core::{
    site_store::SiteStore, Error, PublicSiteView, Result, Subdomain,
};

/// Visibility-gated site reads with a per-subdomain cache.
///
/// Only published views ever enter the cache; negative results are never
/// cached. Every mutation for a tenant must call `invalidate` with the
/// tenant's subdomain - staleness beyond one mutation cycle is a correctness
/// bug here, not a latency tradeoff, so invalidation also bumps a generation
/// counter that defeats the read-then-invalidate-then-insert race.
pub struct SiteAssembly {
    store: Arc<dyn SiteStore>,
    cache: DashMap<String, (u64, Arc<PublicSiteView>)>,
    generations: DashMap<String, u64>,
}

impl SiteAssembly {
    pub fn new(store: Arc<dyn SiteStore>) -> Self {
        Self {
            store,
            cache: DashMap::new(),
            generations: DashMap::new(),
        }
    }

    fn generation(&self, subdomain: &str) -> u64 {
        self.generations.get(subdomain).map(|g| *g).unwrap_or(0)
    }

    /// Assemble the public view for the site at a subdomain label.
    ///
    /// The label arrives raw from the host resolver; a label that does not
    /// parse as a subdomain cannot have a record and is `NotFound`.
    ///
    /// # Errors
    /// - `Error::NotFound` if no record claims the label
    /// - `Error::NotPublished` if the record is in Draft state (rendered
    ///   identically to `NotFound` at the HTTP surface)
    pub async fn assemble(&self, label: &str) -> Result<Arc<PublicSiteView>> {
        let generation = self.generation(label);
        if let Some(entry) = self.cache.get(label)
            && entry.0 == generation
        {
            return Ok(entry.1.clone());
        }

        let subdomain = Subdomain::new(label).map_err(|_| Error::NotFound)?;
        let record = self.store.get_by_subdomain(&subdomain).await?;
        if !record.is_published {
            return Err(Error::NotPublished);
        }

        let view = Arc::new(PublicSiteView::from_record(&record));
        // Insert only if no mutation landed while we were reading.
        if self.generation(label) == generation {
            self.cache
                .insert(label.to_string(), (generation, view.clone()));
        }
        Ok(view)
    }

    /// Drop any cached view for a subdomain. Called on every content edit,
    /// publish, and unpublish for the owning tenant.
    pub fn invalidate(&self, subdomain: &str) {
        *self.generations.entry(subdomain.to_string()).or_insert(0) += 1;
        self.cache.remove(subdomain);
        debug!(subdomain, "invalidated assembled site view");
    }
}
