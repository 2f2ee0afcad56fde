//! Host name classification for tenant routing
//!
//! This module provides a resolver to determine whether an inbound request's
//! host name targets the platform's own application surface or a tenant site.

use std::collections::HashSet;

use siteloom_core::RESERVED_LABELS;

/// Routing decision for an inbound host name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRoute {
    /// The platform's own application surface (dashboards, onboarding).
    MainApplication,
    /// A tenant site lookup for the leftmost host label. The label is raw:
    /// whether a tenant actually exists under it is decided at content
    /// lookup, not here.
    Tenant(String),
    /// Reserved or empty leftmost label; falls through to normal app routes.
    Ignored,
}

/// Classifies inbound host names as main-application or tenant traffic.
///
/// The main-host set is explicit, exact-match, and never inferred: a host
/// with no `.` (a local development alias, say) is main-application traffic
/// only when configured as such.
#[derive(Debug, Clone)]
pub struct HostResolver {
    main_hosts: HashSet<String>,
}

impl HostResolver {
    /// Create a resolver from the configured main-application host names.
    ///
    /// Entries are normalized the same way inbound hosts are (port stripped,
    /// lowercased) so config casing cannot break the exact match.
    pub fn new<I, S>(main_hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let main_hosts = main_hosts
            .into_iter()
            .map(|h| normalize_host(h.as_ref()))
            .filter(|h| !h.is_empty())
            .collect();
        Self { main_hosts }
    }

    /// Resolve a request's host name to a routing decision.
    ///
    /// Total over strings; cannot fail. Absence of a matching tenant is
    /// deferred to content lookup.
    pub fn resolve(&self, host: &str) -> HostRoute {
        let host = normalize_host(host);

        if self.main_hosts.contains(&host) {
            return HostRoute::MainApplication;
        }

        let candidate = host.split('.').next().unwrap_or("");
        if candidate.is_empty() || RESERVED_LABELS.contains(&candidate) {
            return HostRoute::Ignored;
        }

        HostRoute::Tenant(candidate.to_string())
    }

    /// The configured main-application host names.
    pub fn main_hosts(&self) -> &HashSet<String> {
        &self.main_hosts
    }
}

/// Strip any port suffix and lowercase.
fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host.rsplit_once(':').map_or(host, |(h, port)| {
        // Only treat the suffix as a port if it parses as one; IPv6 literals
        // keep their colons.
        if port.chars().all(|c| c.is_ascii_digit()) {
            h
        } else {
            host
        }
    });
    host.to_lowercase()
}
