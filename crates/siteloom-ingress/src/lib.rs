//! HTTP surface for Siteloom
//!
//! The request router middleware, public tenant-site routes, the owner
//! editing API, and health endpoints, assembled into one axum `Router`.

pub mod auth;
pub mod error;
pub mod health;
pub mod middleware;
pub mod owner_routes;
pub mod site_routes;
pub mod state;

pub use auth::{AuthenticatedTenant, TENANT_HEADER};
pub use error::ApiError;
pub use middleware::host_rewrite_middleware;
pub use state::SiteState;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// Build the full application router.
///
/// Every request passes through the host rewrite first; main-application and
/// ignored hosts fall through to the normal routes untouched, tenant hosts
/// land on the tenant-site tree.
pub fn app(state: SiteState) -> Router {
    Router::new()
        .route("/", get(main_app_root))
        .merge(health::router())
        .merge(site_routes::router())
        .merge(owner_routes::router())
        .layer(from_fn_with_state(
            state.clone(),
            host_rewrite_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Placeholder for the platform's own application surface (dashboards,
/// onboarding), which lives outside this core.
async fn main_app_root() -> Json<Value> {
    Json(json!({ "service": "siteloom" }))
}
