//! Host-based request rewriting
//!
//! Intercepts every inbound request, classifies its host name, and rewrites
//! tenant-host requests onto the tenant-site view path. The rewrite is
//! internal - method, headers, and body pass through untouched and the caller
//! never sees a redirect.

use axum::{
    extract::{Request, State},
    http::{header, uri::Uri},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use siteloom_routing::HostRoute;

use crate::state::SiteState;

/// Middleware applying the tenant-host rewrite to every request.
pub async fn host_rewrite_middleware(
    State(state): State<SiteState>,
    mut req: Request,
    next: Next,
) -> Response {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| req.uri().authority().map(|a| a.to_string()))
        .unwrap_or_default();

    let route = state.resolver.resolve(&host);
    debug!(host = %host, route = ?route, "resolved inbound host");

    if let HostRoute::Tenant(label) = &route {
        let path = req.uri().path();
        // Requests already addressed to the tenant-site tree (an internal
        // retry, say) are not rewritten again.
        if !path.starts_with("/sites/") {
            let rewritten = rewrite_path(label, req.uri());
            match rewritten.parse::<Uri>() {
                Ok(uri) => *req.uri_mut() = uri,
                Err(e) => {
                    // Leave the request untouched; it will 404 below.
                    warn!(host = %host, rewritten = %rewritten, "failed to rewrite tenant request: {}", e);
                }
            }
        }
    }

    next.run(req).await
}

/// Map a tenant-host path onto the tenant-site view tree, preserving the
/// query string.
fn rewrite_path(label: &str, uri: &Uri) -> String {
    let path = uri.path();
    let base = if path == "/" {
        format!("/sites/{}", label)
    } else {
        format!("/sites/{}{}", label, path)
    };
    match uri.query() {
        Some(query) => format!("{}?{}", base, query),
        None => base,
    }
}
