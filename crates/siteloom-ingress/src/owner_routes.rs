//! Owner editing API
//!
//! Authenticated mutation surface for a tenant's own site: content saves,
//! publish/unpublish, gallery uploads and removals, booking list. Identity is
//! established by the external identity provider and arrives through the
//! `AuthenticatedTenant` extractor.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use siteloom_core::{ContentUpdate, Subdomain};
use siteloom_site::SaveContentRequest;

use crate::auth::AuthenticatedTenant;
use crate::error::ApiError;
use crate::state::SiteState;

pub fn router() -> Router<SiteState> {
    Router::new()
        .route("/api/site", get(get_site))
        .route("/api/site/content", put(save_content))
        .route("/api/site/publish", post(publish))
        .route("/api/site/unpublish", post(unpublish))
        .route(
            "/api/site/gallery",
            post(add_gallery_image).delete(remove_gallery_image),
        )
        .route("/api/site/bookings", get(list_bookings))
}

/// Full editor save payload. The subdomain and template ride along so the
/// first save can provision the record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavePayload {
    subdomain: Subdomain,
    #[serde(default = "default_template")]
    template_id: String,
    content: ContentUpdate,
}

fn default_template() -> String {
    "classic".to_string()
}

#[derive(Debug, Deserialize)]
struct GalleryUpload {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct GalleryRemove {
    url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GalleryUploaded {
    url: String,
    gallery: Vec<String>,
}

/// `GET /api/site` - the owner's record, draft or published.
async fn get_site(
    State(state): State<SiteState>,
    AuthenticatedTenant(tenant_id): AuthenticatedTenant,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.editor.site(tenant_id).await?;
    Ok(Json(record))
}

/// `PUT /api/site/content` - full save submission; provisions on first save.
async fn save_content(
    State(state): State<SiteState>,
    AuthenticatedTenant(tenant_id): AuthenticatedTenant,
    Json(payload): Json<SavePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .editor
        .save_content(
            tenant_id,
            SaveContentRequest {
                subdomain: payload.subdomain,
                template_id: payload.template_id,
                content: payload.content,
            },
        )
        .await?;
    Ok(Json(record))
}

/// `POST /api/site/publish` - idempotent visibility toggle.
async fn publish(
    State(state): State<SiteState>,
    AuthenticatedTenant(tenant_id): AuthenticatedTenant,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.editor.publish(tenant_id).await?;
    Ok(Json(record))
}

/// `POST /api/site/unpublish`
async fn unpublish(
    State(state): State<SiteState>,
    AuthenticatedTenant(tenant_id): AuthenticatedTenant,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.editor.unpublish(tenant_id).await?;
    Ok(Json(record))
}

/// `POST /api/site/gallery?filename=...` - raw image bytes in the body.
async fn add_gallery_image(
    State(state): State<SiteState>,
    AuthenticatedTenant(tenant_id): AuthenticatedTenant,
    Query(upload): Query<GalleryUpload>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let (record, url) = state
        .editor
        .add_gallery_image(tenant_id, &upload.filename, body)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(GalleryUploaded {
            url,
            gallery: record.content.gallery,
        }),
    ))
}

/// `DELETE /api/site/gallery` - removes the entry, then releases the blob.
async fn remove_gallery_image(
    State(state): State<SiteState>,
    AuthenticatedTenant(tenant_id): AuthenticatedTenant,
    Json(request): Json<GalleryRemove>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .editor
        .remove_gallery_image(tenant_id, &request.url)
        .await?;
    Ok(Json(record))
}

/// `GET /api/site/bookings` - the tenant's bookings, soonest first.
async fn list_bookings(
    State(state): State<SiteState>,
    AuthenticatedTenant(tenant_id): AuthenticatedTenant,
) -> Result<impl IntoResponse, ApiError> {
    let bookings = state.bookings.bookings_for(tenant_id).await?;
    Ok(Json(bookings))
}
