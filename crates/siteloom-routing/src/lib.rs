//! Host-based tenant resolution
//!
//! Maps an inbound request's host name to a routing decision: the platform's
//! main application, a tenant site lookup, or an ignored reserved label.

pub mod host_resolver;

pub use host_resolver::{HostResolver, HostRoute};
