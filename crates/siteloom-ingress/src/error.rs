//! HTTP mapping for core errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use siteloom_core::Error;

/// Wrapper carrying a core error across the axum boundary.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            // NotFound and NotPublished are deliberately indistinguishable:
            // an unpublished draft must not be discoverable.
            Error::NotFound | Error::NotPublished => {
                (StatusCode::NOT_FOUND, "site not found".to_string())
            }
            Error::Validation(msg)
            | Error::InvalidSubdomain(msg)
            | Error::InvalidTenant(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            Error::Upstream(msg) => {
                error!("upstream dependency unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "temporarily unavailable".to_string(),
                )
            }
            other => {
                error!("internal error serving request: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
