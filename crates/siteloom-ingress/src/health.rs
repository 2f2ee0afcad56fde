//! Health endpoints
//!
//! - `/healthz` - liveness probe (200 whenever the server is running)
//! - `/readyz` - readiness probe

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::SiteState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub fn router() -> Router<SiteState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn readyz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready".to_string(),
    })
}
