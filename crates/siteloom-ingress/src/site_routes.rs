//! Public tenant-site routes
//!
//! The visitor-facing read path and the booking form intake. Both are gated
//! on publication; a draft or unknown site answers with the same 404 shape.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use siteloom_core::BookingRequest;

use crate::error::ApiError;
use crate::state::SiteState;

pub fn router() -> Router<SiteState> {
    Router::new()
        .route("/sites/{subdomain}", get(public_site))
        .route("/sites/{subdomain}/bookings", post(create_booking))
}

/// `GET /sites/{subdomain}` - the assembled public view of a published site.
async fn public_site(
    State(state): State<SiteState>,
    Path(subdomain): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.assembly.assemble(&subdomain).await?;
    Ok(Json((*view).clone()))
}

/// `POST /sites/{subdomain}/bookings` - booking form submission.
async fn create_booking(
    State(state): State<SiteState>,
    Path(subdomain): Path<String>,
    Json(request): Json<BookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state.bookings.request_booking(&subdomain, request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}
