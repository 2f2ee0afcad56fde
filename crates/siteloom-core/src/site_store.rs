//! Site store traits
//!
//! The `SiteStore` trait provides typed access to a tenant's site record,
//! abstracting over the external structured data store. Implementations:
//! - `MemorySiteStore`: in-process maps (dev and tests)
//! - `PostgresSiteStore`: JSONB-backed rows (production)

use async_trait::async_trait;

use crate::booking::Booking;
use crate::content::{ContentUpdate, SiteContent};
use crate::site::SiteRecord;
use crate::tenant::{Subdomain, TenantId};
use crate::Result;

/// Typed read/write access to site records.
///
/// One record per tenant, keyed by `TenantId`, with a secondary unique index
/// on `Subdomain` for resolver lookups. Provisioning is always an explicit
/// `create` call, never a side effect of a failed `get`.
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Fetch the site record for a tenant.
    ///
    /// # Errors
    /// - `Error::NotFound` if the tenant has no record (unprovisioned)
    /// - `Error::Upstream` if the backing store is unreachable
    async fn get(&self, tenant_id: TenantId) -> Result<SiteRecord>;

    /// Fetch the site record reachable at a subdomain.
    ///
    /// # Errors
    /// - `Error::NotFound` if no record claims the subdomain
    /// - `Error::Upstream` if the backing store is unreachable
    async fn get_by_subdomain(&self, subdomain: &Subdomain) -> Result<SiteRecord>;

    /// Provision a new site record in Draft state.
    ///
    /// Subdomain uniqueness is enforced at subdomain-assignment time, but
    /// implementations must still check defensively.
    ///
    /// # Errors
    /// - `Error::Conflict` if the tenant already has a record, or the
    ///   subdomain is claimed by a different tenant
    async fn create(
        &self,
        tenant_id: TenantId,
        subdomain: Subdomain,
        template_id: String,
        content: SiteContent,
    ) -> Result<SiteRecord>;

    /// Apply a content update to an existing record.
    ///
    /// Field-level merge for top-level info fields; full replace for the
    /// list-valued fields (`services`, `gallery`, `hours`). Atomic: a failed
    /// update leaves the prior record intact. Stamps `updated_at`.
    ///
    /// # Errors
    /// - `Error::NotFound` if the tenant is unprovisioned
    async fn upsert_content(
        &self,
        tenant_id: TenantId,
        update: ContentUpdate,
    ) -> Result<SiteRecord>;

    /// Set the publication flag. Idempotent; stamps `updated_at`.
    ///
    /// # Errors
    /// - `Error::NotFound` if the tenant is unprovisioned
    async fn set_published(&self, tenant_id: TenantId, published: bool) -> Result<SiteRecord>;
}

/// Storage for visitor booking requests.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persist a booking.
    async fn create_booking(&self, booking: Booking) -> Result<Booking>;

    /// List a tenant's bookings ordered by appointment date, soonest first.
    async fn bookings_for(&self, tenant_id: TenantId) -> Result<Vec<Booking>>;
}
