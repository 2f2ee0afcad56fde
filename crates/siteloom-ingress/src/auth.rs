//! Authenticated tenant identity at the HTTP boundary
//!
//! Authentication itself lives with the external identity provider, which
//! terminates the session ahead of this service and forwards the verified
//! account id in a trusted header. This module turns that header into an
//! explicit parameter so nothing downstream reads ambient request state.

use axum::{extract::FromRequestParts, http::request::Parts};

use siteloom_core::{Error, TenantId};

use crate::error::ApiError;

/// Header carrying the identity-provider-verified tenant id.
pub const TENANT_HEADER: &str = "x-authenticated-tenant";

/// Extractor for the authenticated tenant on owner routes.
///
/// Rejects with 401 when the header is missing or malformed; owner routes
/// never fall back to any other identity source.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedTenant(pub TenantId);

impl<S> FromRequestParts<S> for AuthenticatedTenant
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tenant_id = parts
            .headers
            .get(TENANT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| TenantId::from_string(v).ok())
            .ok_or(ApiError(Error::Unauthorized))?;
        Ok(Self(tenant_id))
    }
}
