//! Error path tests for the contact endpoint.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};

fn detail_fields(body: &serde_json::Value) -> Vec<String> {
    body["details"]
        .as_array()
        .map(|details| {
            details
                .iter()
                .filter_map(|d| d["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Every invalid field is reported, in form order, and nothing is sent.
#[tokio::test]
async fn test_all_fields_invalid() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "198.51.100.10")
        .json(&fixtures::all_invalid_inquiry())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid form data");
    assert_eq!(body["code"], "VALID_001");
    assert_eq!(
        detail_fields(&body),
        vec!["name", "phone", "email", "service", "description"]
    );
    assert_eq!(body["details"][0]["message"], "Name must be at least 2 characters");
    assert_eq!(ctx.sent_count(), 0);
}

/// Description length is inclusive at ten characters.
#[tokio::test]
async fn test_description_boundary() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "198.51.100.11")
        .json(&fixtures::with(fixtures::valid_inquiry(), "description", "123456789"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&response.json()), vec!["description"]);

    server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "198.51.100.11")
        .json(&fixtures::with(fixtures::valid_inquiry(), "description", "1234567890"))
        .await
        .assert_status_ok();

    assert_eq!(ctx.sent_count(), 1);
}

/// Unknown service values are rejected.
#[tokio::test]
async fn test_unknown_service() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "198.51.100.12")
        .json(&fixtures::with(fixtures::valid_inquiry(), "service", "landscaping"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(detail_fields(&body), vec!["service"]);
    assert_eq!(body["details"][0]["message"], "Please select a service");
}

/// Missing fields are treated as empty strings.
#[tokio::test]
async fn test_missing_fields() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "198.51.100.13")
        .json(&serde_json::json!({ "name": "Jane Doe" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        detail_fields(&response.json()),
        vec!["phone", "email", "service", "description"]
    );
}

/// Bodies that are not JSON are a client error.
#[tokio::test]
async fn test_malformed_json() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/contact")
        .content_type("application/json")
        .add_header("X-Forwarded-For", "198.51.100.14")
        .text("{\"name\": \"Jane")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALID_001");
    assert_eq!(detail_fields(&body), vec!["body"]);
}

/// Oversized bodies are refused before parsing.
#[tokio::test]
async fn test_oversized_body() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let huge = "x".repeat(100 * 1024);
    let response = server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "198.51.100.15")
        .json(&fixtures::with(fixtures::valid_inquiry(), "description", &huge))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(ctx.sent_count(), 0);
}

/// Transport failures surface as a generic 500 without SMTP detail.
#[tokio::test]
async fn test_transport_failure() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    ctx.set_transport_failure(true);

    let response = server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "198.51.100.16")
        .json(&fixtures::valid_inquiry())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Failed to send message. Please try again.");
    assert_eq!(body["code"], "MAIL_001");
    assert!(!body.to_string().contains("535"));
    assert_eq!(ctx.sent_count(), 0);
}

/// The endpoint only accepts POST.
#[tokio::test]
async fn test_get_not_allowed() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    server
        .get("/api/contact")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
