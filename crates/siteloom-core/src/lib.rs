//! Siteloom Core Types and Traits
//!
//! This crate provides the fundamental types and traits used throughout
//! Siteloom:
//! - Tenant identity and validated subdomains
//! - The structured site content schema and partial-save payloads
//! - Site record and public view types
//! - Store trait abstractions over the external data and blob stores
//! - Core error types

pub mod blob_store;
pub mod booking;
pub mod content;
pub mod error;
pub mod site;
pub mod site_store;
pub mod tenant;

pub use blob_store::BlobStore;
pub use booking::{Booking, BookingRequest, BookingStatus};
pub use content::{ColorScheme, ContentUpdate, Service, SiteContent, SocialLinks};
pub use error::{Error, Result};
pub use site::{PublicSiteView, SiteRecord};
pub use site_store::{BookingStore, SiteStore};
pub use tenant::{Subdomain, TenantId, RESERVED_LABELS};
