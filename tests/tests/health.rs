//! Tests for health check endpoints.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::setup::TestContext;

/// Test /health endpoint returns proper structure
#[tokio::test]
async fn test_health_endpoint_structure() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["mail_connected"], true);
    assert_eq!(body["mail_transport"], "mock");
    assert!(
        body["metrics"].get("inquiries_received").is_some(),
        "Response should include metrics"
    );
}

/// Test /health/ready endpoint once mail is connected
#[tokio::test]
async fn test_ready_endpoint() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    server.get("/health/ready").await.assert_status_ok();
}

/// Test /health/live endpoint always returns 200 when service is running
#[tokio::test]
async fn test_live_endpoint() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    server.get("/health/live").await.assert_status(StatusCode::OK);
}

/// Relayed inquiries show up in the metrics snapshot
#[tokio::test]
async fn test_metrics_count_relays() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let before: serde_json::Value = server.get("/health").await.json();
    let before = before["metrics"]["inquiries_relayed"].as_u64().unwrap_or(0);

    server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "192.0.2.50")
        .json(&integration_tests::fixtures::valid_inquiry())
        .await
        .assert_status_ok();

    let after: serde_json::Value = server.get("/health").await.json();
    let after = after["metrics"]["inquiries_relayed"].as_u64().unwrap_or(0);
    assert!(after > before);
}
