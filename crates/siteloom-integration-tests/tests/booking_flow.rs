//! Booking intake through a tenant host
//!
//! Visitors book through a published site's host; draft and unknown sites
//! answer with the public 404 shape, and the owner sees stored bookings
//! ordered by appointment date.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{save_site, send, set_published, test_env, MAIN_HOST};
use siteloom_core::TenantId;

fn booking(name: &str, date: &str) -> serde_json::Value {
    json!({
        "clientName": name,
        "clientEmail": "client@example.com",
        "clientPhone": "(555) 123-4567",
        "serviceName": "Signature Facial",
        "appointmentDate": date,
        "appointmentTime": "2:30pm"
    })
}

#[tokio::test]
async fn test_booking_through_tenant_host() {
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

    // The booking form posts to the tenant host; the rewrite carries the
    // POST body through unchanged.
    let (status, body) = send(
        &env.app,
        Method::POST,
        "bellas.platform.com",
        "/bookings",
        None,
        Some(booking("Avery", "2026-09-15")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");

    send(
        &env.app,
        Method::POST,
        "bellas.platform.com",
        "/bookings",
        None,
        Some(booking("Blake", "2026-09-01")),
    )
    .await;

    // Owner listing, soonest appointment first.
    let (status, listed) = send(
        &env.app,
        Method::GET,
        MAIN_HOST,
        "/api/site/bookings",
        Some(tenant_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["clientName"], "Blake");
    assert_eq!(listed[1]["clientName"], "Avery");
}

#[tokio::test]
async fn test_booking_on_draft_site_is_the_public_404() {
    let env = test_env();
    let tenant_id = TenantId::new();
    save_site(
        &env.app,
        tenant_id,
        "bellas",
        json!({"businessName": "Bella's"}),
    )
    .await;

    let (status, body) = send(
        &env.app,
        Method::POST,
        "bellas.platform.com",
        "/bookings",
        None,
        Some(booking("Avery", "2026-09-15")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "site not found");
}

#[tokio::test]
async fn test_booking_validation() {
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

    let mut bad = booking("Avery", "2026-09-15");
    bad["clientEmail"] = json!("not-an-email");
    let (status, _) = send(
        &env.app,
        Method::POST,
        "bellas.platform.com",
        "/bookings",
        None,
        Some(bad),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
