//! Host-based routing through the full middleware stack
//!
//! Main-application and reserved hosts pass through to normal routes
//! untouched; tenant hosts are rewritten internally onto the tenant-site
//! tree with method, headers, and body preserved - never a redirect.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{public_get, save_site, set_published, test_env};
use siteloom_core::TenantId;

#[tokio::test]
async fn test_main_hosts_reach_the_main_application() {
    let env = test_env();

    for host in ["platform.com", "localhost", "platform.com:443", "LOCALHOST:3000"] {
        let (status, body) = public_get(&env.app, host, "/").await;
        assert_eq!(status, StatusCode::OK, "host {}", host);
        assert_eq!(body["service"], "siteloom");
    }
}

#[tokio::test]
async fn test_reserved_labels_fall_through_to_main_routes() {
    let env = test_env();

    for host in ["www.platform.com", "api.platform.com"] {
        let (status, body) = public_get(&env.app, host, "/").await;
        assert_eq!(status, StatusCode::OK, "host {}", host);
        assert_eq!(body["service"], "siteloom");
    }
}

#[tokio::test]
async fn test_tenant_host_rewrites_without_redirect() {
    let env = test_env();
    let tenant_id = TenantId::new();
    save_site(
        &env.app,
        tenant_id,
        "bellas",
        json!({"businessName": "Bella's"}),
    )
    .await;
    set_published(&env.app, tenant_id, true).await;

    let (status, body) = public_get(&env.app, "bellas.platform.com", "/").await;
    // A rewrite answers directly; a redirect would be 3xx.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["businessName"], "Bella's");
}

#[tokio::test]
async fn test_unknown_tenant_is_not_found_not_an_error() {
    let env = test_env();

    let (status, body) = public_get(&env.app, "nosuchtenant.platform.com", "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "site not found");
}

#[tokio::test]
async fn test_health_endpoints_on_main_host() {
    let env = test_env();

    let (status, body) = public_get(&env.app, "platform.com", "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _) = public_get(&env.app, "platform.com", "/readyz").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_direct_site_path_on_main_host_still_works() {
    // The editor preview fetches /sites/{subdomain} on the main host; the
    // rewrite must not mangle requests already addressed to the site tree.
    let env = test_env();
    let tenant_id = TenantId::new();
    save_site(
        &env.app,
        tenant_id,
        "bellas",
        json!({"businessName": "Bella's"}),
    )
    .await;
    set_published(&env.app, tenant_id, true).await;

    let (status, body) = public_get(&env.app, "platform.com", "/sites/bellas").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["businessName"], "Bella's");

    // And the same path on the tenant's own host is not double-rewritten.
    let (status, _) = public_get(&env.app, "bellas.platform.com", "/sites/bellas").await;
    assert_eq!(status, StatusCode::OK);
}
