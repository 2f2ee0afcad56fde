//! Booking intake and owner listing
//!
//! Visitor booking requests come in through a published site and are stored
//! as-submitted; calendar conflict resolution happens elsewhere. The intake
//! path reuses the publication gate so a booking form never confirms the
//! existence of an unpublished draft.

use std::sync::Arc;
use tracing::info;

use siteloom_core::{
    site_store::{BookingStore, SiteStore},
    Booking, BookingRequest, Error, Result, Subdomain, TenantId,
};

pub struct BookingService {
    sites: Arc<dyn SiteStore>,
    bookings: Arc<dyn BookingStore>,
}

impl BookingService {
    pub fn new(sites: Arc<dyn SiteStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { sites, bookings }
    }

    /// Accept a booking request submitted at a tenant site's host.
    ///
    /// # Errors
    /// - `Error::NotFound` / `Error::NotPublished` when the site is not
    ///   publicly visible (same 404 shape as the public page)
    /// - `Error::Validation` for a malformed request
    pub async fn request_booking(&self, label: &str, request: BookingRequest) -> Result<Booking> {
        let subdomain = Subdomain::new(label).map_err(|_| Error::NotFound)?;
        let record = self.sites.get_by_subdomain(&subdomain).await?;
        if !record.is_published {
            return Err(Error::NotPublished);
        }

        request.validate()?;
        let booking = self
            .bookings
            .create_booking(request.into_booking(record.tenant_id))
            .await?;
        info!(tenant_id = %record.tenant_id, booking_id = %booking.id, "booking request stored");
        Ok(booking)
    }

    /// The owner's booking list, soonest appointment first.
    pub async fn bookings_for(&self, tenant_id: TenantId) -> Result<Vec<Booking>> {
        self.bookings.bookings_for(tenant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use siteloom_core::SiteContent;
    use siteloom_store_memory::MemorySiteStore;

    fn request() -> BookingRequest {
        BookingRequest {
            client_name: "Avery".to_string(),
            client_email: "avery@example.com".to_string(),
            client_phone: String::new(),
            service_name: "Signature Facial".to_string(),
            appointment_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            appointment_time: "2:30pm".to_string(),
            notes: None,
        }
    }

    async fn site(store: &Arc<MemorySiteStore>, published: bool) -> TenantId {
        let tenant_id = TenantId::new();
        store
            .create(
                tenant_id,
                Subdomain::new("bellas").unwrap(),
                "classic".to_string(),
                SiteContent {
                    business_name: "Bella's".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        if published {
            store.set_published(tenant_id, true).await.unwrap();
        }
        tenant_id
    }

    #[tokio::test]
    async fn test_booking_on_published_site() {
        let store = Arc::new(MemorySiteStore::new());
        let tenant_id = site(&store, true).await;
        let service = BookingService::new(store.clone(), store.clone());

        let booking = service.request_booking("bellas", request()).await.unwrap();
        assert_eq!(booking.tenant_id, tenant_id);

        let listed = service.bookings_for(tenant_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].client_name, "Avery");
    }

    #[tokio::test]
    async fn test_booking_on_draft_site_is_gated() {
        let store = Arc::new(MemorySiteStore::new());
        let tenant_id = site(&store, false).await;
        let service = BookingService::new(store.clone(), store.clone());

        let result = service.request_booking("bellas", request()).await;
        assert!(matches!(result, Err(Error::NotPublished)));
        assert!(service.bookings_for(tenant_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_booking_on_unknown_site_is_not_found() {
        let store = Arc::new(MemorySiteStore::new());
        let service = BookingService::new(store.clone(), store.clone());

        let result = service.request_booking("nosuchtenant", request()).await;
        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn test_bookings_listed_by_appointment_date() {
        let store = Arc::new(MemorySiteStore::new());
        let tenant_id = site(&store, true).await;
        let service = BookingService::new(store.clone(), store.clone());

        let mut later = request();
        later.appointment_date = NaiveDate::from_ymd_opt(2026, 9, 15).unwrap();
        later.client_name = "Later".to_string();
        service.request_booking("bellas", later).await.unwrap();
        service.request_booking("bellas", request()).await.unwrap();

        let listed = service.bookings_for(tenant_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].client_name, "Avery");
        assert_eq!(listed[1].client_name, "Later");
    }
}
