//! In-memory SiteStore and BookingStore implementations

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info};

use siteloom_core::{
    site_store::{BookingStore, SiteStore},
    Booking, ContentUpdate, Error, Result, SiteContent, SiteRecord, Subdomain, TenantId,
};

/// In-memory site store for development and tests.
///
/// Holds one record per tenant with a secondary subdomain index mirroring the
/// unique index a database backend would carry. Mutations go through the
/// record map's per-entry locks, so a save is atomic at the granularity of a
/// full submission.
#[derive(Debug, Default)]
pub struct MemorySiteStore {
    records: DashMap<TenantId, SiteRecord>,
    /// subdomain label -> owning tenant
    subdomains: DashMap<String, TenantId>,
    bookings: DashMap<TenantId, Vec<Booking>>,
}

impl MemorySiteStore {
    pub fn new() -> Self {
        info!("Initialized MemorySiteStore");
        Self::default()
    }

    /// Number of provisioned site records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl SiteStore for MemorySiteStore {
    async fn get(&self, tenant_id: TenantId) -> Result<SiteRecord> {
        self.records
            .get(&tenant_id)
            .map(|r| r.clone())
            .ok_or(Error::NotFound)
    }

    async fn get_by_subdomain(&self, subdomain: &Subdomain) -> Result<SiteRecord> {
        let tenant_id = self
            .subdomains
            .get(subdomain.as_str())
            .map(|t| *t)
            .ok_or(Error::NotFound)?;
        self.get(tenant_id).await
    }

    async fn create(
        &self,
        tenant_id: TenantId,
        subdomain: Subdomain,
        template_id: String,
        content: SiteContent,
    ) -> Result<SiteRecord> {
        if self.records.contains_key(&tenant_id) {
            return Err(Error::Conflict(format!(
                "tenant {} already has a site record",
                tenant_id
            )));
        }

        // Claim the subdomain before inserting the record; the entry lock
        // makes the claim atomic across concurrent creates.
        match self.subdomains.entry(subdomain.as_str().to_string()) {
            Entry::Occupied(occupied) if *occupied.get() != tenant_id => {
                return Err(Error::Conflict(format!(
                    "subdomain '{}' is already claimed",
                    subdomain
                )));
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(vacant) => {
                vacant.insert(tenant_id);
            }
        }

        let record = SiteRecord::provisioned(tenant_id, subdomain, template_id, content);
        self.records.insert(tenant_id, record.clone());
        debug!(tenant_id = %tenant_id, subdomain = %record.subdomain, "provisioned site record");
        Ok(record)
    }

    async fn upsert_content(
        &self,
        tenant_id: TenantId,
        update: ContentUpdate,
    ) -> Result<SiteRecord> {
        let mut entry = self.records.get_mut(&tenant_id).ok_or(Error::NotFound)?;
        update.apply_to(&mut entry.content);
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn set_published(&self, tenant_id: TenantId, published: bool) -> Result<SiteRecord> {
        let mut entry = self.records.get_mut(&tenant_id).ok_or(Error::NotFound)?;
        if entry.is_published != published {
            entry.is_published = published;
            entry.updated_at = Utc::now();
        }
        Ok(entry.clone())
    }
}

#[async_trait]
impl BookingStore for MemorySiteStore {
    async fn create_booking(&self, booking: Booking) -> Result<Booking> {
        self.bookings
            .entry(booking.tenant_id)
            .or_default()
            .push(booking.clone());
        Ok(booking)
    }

    async fn bookings_for(&self, tenant_id: TenantId) -> Result<Vec<Booking>> {
        let mut bookings = self
            .bookings
            .get(&tenant_id)
            .map(|b| b.clone())
            .unwrap_or_default();
        bookings.sort_by_key(|b| b.appointment_date);
        Ok(bookings)
    }
}
