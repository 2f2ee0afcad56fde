//! Visitor booking requests attached to a tenant's site

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tenant::TenantId;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(Error::Validation(format!(
                "unknown booking status '{}'",
                other
            ))),
        }
    }
}

/// An appointment request submitted through a published site's booking form.
///
/// Calendar conflict resolution is out of scope; bookings are stored as
/// submitted and surfaced to the owner ordered by appointment date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub client_name: String,
    pub client_email: String,
    #[serde(default)]
    pub client_phone: String,
    pub service_name: String,
    pub appointment_date: NaiveDate,
    /// Display time slot, e.g. "2:30pm"
    pub appointment_time: String,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload accepted from the public booking form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub client_name: String,
    pub client_email: String,
    #[serde(default)]
    pub client_phone: String,
    pub service_name: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BookingRequest {
    pub fn validate(&self) -> Result<()> {
        if self.client_name.trim().is_empty() {
            return Err(Error::Validation("client name is required".to_string()));
        }
        if self.client_email.trim().is_empty() || !self.client_email.contains('@') {
            return Err(Error::Validation(
                "a valid client email is required".to_string(),
            ));
        }
        if self.service_name.trim().is_empty() {
            return Err(Error::Validation("service name is required".to_string()));
        }
        Ok(())
    }

    /// Stamp the request into a stored booking for the given tenant.
    pub fn into_booking(self, tenant_id: TenantId) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            tenant_id,
            client_name: self.client_name,
            client_email: self.client_email,
            client_phone: self.client_phone,
            service_name: self.service_name,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
            status: BookingStatus::Pending,
            notes: self.notes,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> BookingRequest {
        BookingRequest {
            client_name: "Avery".to_string(),
            client_email: "avery@example.com".to_string(),
            client_phone: "(555) 123-4567".to_string(),
            service_name: "Signature Facial".to_string(),
            appointment_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            appointment_time: "2:30pm".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_booking_request_validates() {
        assert!(sample_request().validate().is_ok());
    }

    #[test]
    fn test_booking_request_rejects_bad_email() {
        let mut req = sample_request();
        req.client_email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_into_booking_defaults_to_pending() {
        let tenant_id = TenantId::new();
        let booking = sample_request().into_booking(tenant_id);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.tenant_id, tenant_id);
    }
}
