//! Tenant identity types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{Error, Result};

/// Unique identifier for a tenant (one business account).
///
/// Assigned at account creation and immutable for the life of the account.
/// Every site record, gallery asset path, and booking is keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(Uuid);

impl TenantId {
    /// Create a new random tenant ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a tenant ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse a tenant ID from a string
    pub fn from_string(s: &str) -> Result<Self> {
        let uuid = Uuid::parse_str(s)
            .map_err(|e| Error::InvalidTenant(format!("Invalid tenant ID format: {}", e)))?;
        Ok(Self(uuid))
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

/// Labels that can never be claimed as tenant subdomains.
///
/// These route to the main application surface instead of a tenant lookup.
pub const RESERVED_LABELS: &[&str] = &["www", "api"];

static SUBDOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,18}[a-z0-9])?$").expect("valid regex"));

/// A validated tenant subdomain label.
///
/// The owner-chosen label used in the public host name to reach their site
/// (`<subdomain>.platform.example`). Normalized to lowercase at creation;
/// 1-20 characters from `[a-z0-9-]`, no leading or trailing hyphen.
/// Immutable once a site exists under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subdomain(String);

impl Subdomain {
    /// Normalize and validate a candidate subdomain.
    ///
    /// # Errors
    /// - `Error::InvalidSubdomain` if the label is empty, too long, contains
    ///   characters outside `[a-z0-9-]` after lowercasing, has a leading or
    ///   trailing hyphen, or is a reserved label.
    pub fn new(candidate: &str) -> Result<Self> {
        let normalized = candidate.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(Error::InvalidSubdomain("subdomain is empty".to_string()));
        }
        if normalized.len() > 20 {
            return Err(Error::InvalidSubdomain(format!(
                "subdomain '{}' exceeds 20 characters",
                normalized
            )));
        }
        if !SUBDOMAIN_RE.is_match(&normalized) {
            return Err(Error::InvalidSubdomain(format!(
                "subdomain '{}' must be lowercase alphanumeric with interior hyphens",
                normalized
            )));
        }
        if RESERVED_LABELS.contains(&normalized.as_str()) {
            return Err(Error::InvalidSubdomain(format!(
                "subdomain '{}' is reserved",
                normalized
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Subdomain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Subdomain {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}

impl From<Subdomain> for String {
    fn from(s: Subdomain) -> Self {
        s.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_creation() {
        let id1 = TenantId::new();
        let id2 = TenantId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_tenant_id_from_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let tenant_id = TenantId::from_string(uuid_str).unwrap();
        assert_eq!(tenant_id.to_string(), uuid_str);
    }

    #[test]
    fn test_tenant_id_invalid_string() {
        let result = TenantId::from_string("not-a-uuid");
        assert!(result.is_err());
    }

    #[test]
    fn test_subdomain_normalizes_case() {
        let sub = Subdomain::new("  Bellas ").unwrap();
        assert_eq!(sub.as_str(), "bellas");
    }

    #[test]
    fn test_subdomain_allows_interior_hyphen() {
        assert!(Subdomain::new("glow-studio").is_ok());
        assert!(Subdomain::new("a").is_ok());
        assert!(Subdomain::new("studio42").is_ok());
    }

    #[test]
    fn test_subdomain_rejects_bad_shapes() {
        assert!(Subdomain::new("").is_err());
        assert!(Subdomain::new("-glow").is_err());
        assert!(Subdomain::new("glow-").is_err());
        assert!(Subdomain::new("glow studio").is_err());
        assert!(Subdomain::new("glöw").is_err());
        assert!(Subdomain::new("a-very-long-subdomain-label").is_err());
    }

    #[test]
    fn test_subdomain_rejects_reserved() {
        assert!(Subdomain::new("www").is_err());
        assert!(Subdomain::new("api").is_err());
        assert!(Subdomain::new("API").is_err());
    }

    #[test]
    fn test_subdomain_serde_round_trip() {
        let sub = Subdomain::new("bellas").unwrap();
        let json = serde_json::to_string(&sub).unwrap();
        assert_eq!(json, "\"bellas\"");
        let back: Subdomain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sub);
    }

    #[test]
    fn test_subdomain_serde_rejects_invalid() {
        let result: std::result::Result<Subdomain, _> = serde_json::from_str("\"www\"");
        assert!(result.is_err());
    }
}
