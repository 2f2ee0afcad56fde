//! Site record and the externally-visible site view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::SiteContent;
use crate::tenant::{Subdomain, TenantId};

/// Persisted content and publication state for one tenant. 1:1 with the
/// tenant; created lazily on the first editor save, never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteRecord {
    pub tenant_id: TenantId,
    pub subdomain: Subdomain,
    /// Presentation template identifier; opaque to this core.
    pub template_id: String,
    pub content: SiteContent,
    /// Visibility gate. Only a record with `is_published == true` is ever
    /// served to unauthenticated visitors.
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    /// Stamped on every content or publish-state mutation.
    pub updated_at: DateTime<Utc>,
}

impl SiteRecord {
    /// Create a freshly provisioned record in Draft state.
    pub fn provisioned(
        tenant_id: TenantId,
        subdomain: Subdomain,
        template_id: impl Into<String>,
        content: SiteContent,
    ) -> Self {
        let now = Utc::now();
        Self {
            tenant_id,
            subdomain,
            template_id: template_id.into(),
            content,
            is_published: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Read-only composed view of a published site, served to visitors and used
/// by the owner's editor preview. Built only from a published record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicSiteView {
    pub subdomain: Subdomain,
    pub template_id: String,
    #[serde(flatten)]
    pub content: SiteContent,
}

impl PublicSiteView {
    /// Compose the public view from a record.
    ///
    /// Callers must have already passed the visibility gate; this is a pure
    /// projection and performs no publication check of its own.
    pub fn from_record(record: &SiteRecord) -> Self {
        Self {
            subdomain: record.subdomain.clone(),
            template_id: record.template_id.clone(),
            content: record.content.clone(),
        }
    }
}
