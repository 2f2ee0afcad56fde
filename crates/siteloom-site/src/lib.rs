//! Site lifecycle services
//!
//! The publication state machine, the visibility-gated assembly service, the
//! owner-facing editor, and booking intake. Everything here is injected with
//! `Arc<dyn SiteStore>` / `Arc<dyn BlobStore>` so the same logic runs over
//! the in-memory and PostgreSQL backends.

pub mod assembly;
pub mod bookings;
pub mod editor;
pub mod publication;

pub use assembly::SiteAssembly;
pub use bookings::BookingService;
pub use editor::{SaveContentRequest, SiteEditor};
pub use publication::PublicationState;
