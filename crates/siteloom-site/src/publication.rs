//! Publication state machine
//!
//! States: `Unprovisioned -> Draft -> Published <-> Draft`. Unprovisioned is
//! absorbing until the first editor save provisions a record; Draft and
//! Published are mutually exclusive visibility states after that. The
//! visibility gate consults only `is_published`; no code path serves Draft
//! content to an unauthenticated caller.

use siteloom_core::SiteRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationState {
    /// No site record exists yet; resolves to onboarding, never a stale page.
    Unprovisioned,
    /// Record exists, content not publicly visible.
    Draft,
    /// Record exists and is publicly visible at the tenant's host.
    Published,
}

impl PublicationState {
    /// Derive the state from a store lookup result.
    pub fn of(record: Option<&SiteRecord>) -> Self {
        match record {
            None => PublicationState::Unprovisioned,
            Some(r) if r.is_published => PublicationState::Published,
            Some(_) => PublicationState::Draft,
        }
    }

    /// Whether unauthenticated visitors may see content in this state.
    pub fn is_publicly_visible(&self) -> bool {
        matches!(self, PublicationState::Published)
    }

    /// Whether `publish` is a valid transition from this state.
    ///
    /// `publish` from Published is an idempotent no-op success, so only
    /// Unprovisioned refuses it.
    pub fn can_publish(&self) -> bool {
        !matches!(self, PublicationState::Unprovisioned)
    }
}
