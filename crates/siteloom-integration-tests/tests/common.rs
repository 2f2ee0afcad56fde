//! Shared helpers for integration tests
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use siteloom_blob::MemoryBlobStore;
use siteloom_core::TenantId;
use siteloom_ingress::{SiteState, TENANT_HEADER};
use siteloom_routing::HostResolver;
use siteloom_store_memory::MemorySiteStore;

pub const MAIN_HOST: &str = "platform.com";

pub struct TestEnv {
    pub app: Router,
    pub store: Arc<MemorySiteStore>,
    pub blobs: Arc<MemoryBlobStore>,
}

/// Fully wired application over in-memory backends.
pub fn test_env() -> TestEnv {
    let store = Arc::new(MemorySiteStore::new());
    let blobs = Arc::new(MemoryBlobStore::default());
    let state = SiteState::new(
        HostResolver::new([MAIN_HOST, "localhost"]),
        store.clone(),
        store.clone(),
        blobs.clone(),
    );
    TestEnv {
        app: siteloom_ingress::app(state),
        store,
        blobs,
    }
}

/// One request through the app, returning status and parsed JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    host: &str,
    path: &str,
    tenant: Option<TenantId>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::HOST, host);
    if let Some(tenant_id) = tenant {
        builder = builder.header(TENANT_HEADER, tenant_id.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn public_get(app: &Router, host: &str, path: &str) -> (StatusCode, Value) {
    send(app, Method::GET, host, path, None, None).await
}

/// Owner save of a full content submission.
pub async fn save_site(
    app: &Router,
    tenant_id: TenantId,
    subdomain: &str,
    content: Value,
) -> (StatusCode, Value) {
    send(
        app,
        Method::PUT,
        MAIN_HOST,
        "/api/site/content",
        Some(tenant_id),
        Some(serde_json::json!({
            "subdomain": subdomain,
            "templateId": "classic",
            "content": content,
        })),
    )
    .await
}

pub async fn set_published(
    app: &Router,
    tenant_id: TenantId,
    published: bool,
) -> (StatusCode, Value) {
    let path = if published {
        "/api/site/publish"
    } else {
        "/api/site/unpublish"
    };
    send(app, Method::POST, MAIN_HOST, path, Some(tenant_id), None).await
}
