//! PostgreSQL-backed site storage for production Siteloom deployments
//!
//! This crate implements the `SiteStore` and `BookingStore` traits using
//! PostgreSQL:
//! - One `sites` row per tenant, JSONB content column
//! - Unique index on `subdomain` for resolver lookups
//! - Automatic schema migrations at construction
//! - One retry on transient connection failures
//!
//! # Example
//! ```no_run
//! # use siteloom_store_postgres::PostgresSiteStore;
//! # async fn example() -> siteloom_core::Result<()> {
//! let store = PostgresSiteStore::new("postgres://localhost/siteloom").await?;
//! # Ok(())
//! # }
//! ```

mod postgres_store;

pub use postgres_store::PostgresSiteStore;
