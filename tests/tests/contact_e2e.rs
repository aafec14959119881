//! End-to-end tests for the contact pipeline.
//!
//! POST /api/contact → validation → MockTransport (captures emails)
//!
//! MockTransport implements the same MailTransport trait as the SMTP
//! transport, so every production code path runs except the network hop.

use axum_test::TestServer;
use integration_tests::{
    fixtures,
    setup::{TestContext, DESTINATION, SENDER},
};

/// Full pipeline: a valid inquiry produces exactly one email with every field.
#[tokio::test]
async fn test_contact_round_trip() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "203.0.113.10")
        .json(&fixtures::valid_inquiry())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Message sent successfully!");

    let captured = ctx.captured();
    assert_eq!(captured.len(), 1, "Exactly one email should be sent");

    let email = &captured[0];
    assert_eq!(email.from, SENDER);
    assert_eq!(email.to, DESTINATION);
    assert_eq!(email.reply_to.as_deref(), Some("jane@example.com"));
    assert_eq!(email.subject, "New Project Inquiry from Jane Doe");

    for value in [
        "Jane Doe",
        "1234567890",
        "jane@example.com",
        "concept-design",
        "Need a full house redesign",
        "203.0.113.10",
    ] {
        assert!(email.html.contains(value), "email should contain {value}");
    }
}

/// Duplicate submissions are not deduplicated.
#[tokio::test]
async fn test_duplicate_payload_sends_twice() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for _ in 0..2 {
        server
            .post("/api/contact")
            .add_header("X-Forwarded-For", "203.0.113.11")
            .json(&fixtures::valid_inquiry())
            .await
            .assert_status_ok();
    }

    assert_eq!(ctx.sent_count(), 2);
}

/// Honeypot submissions get the normal success body and send nothing.
#[tokio::test]
async fn test_honeypot_is_silently_dropped() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let relayed = server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "203.0.113.12")
        .json(&fixtures::valid_inquiry())
        .await;
    let suppressed = server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "203.0.113.13")
        .json(&fixtures::honeypot_inquiry())
        .await;

    suppressed.assert_status_ok();
    assert_eq!(
        relayed.json::<serde_json::Value>(),
        suppressed.json::<serde_json::Value>()
    );
    assert_eq!(ctx.sent_count(), 1, "Only the genuine inquiry is relayed");
}

/// A whitespace-only honeypot counts as empty.
#[tokio::test]
async fn test_blank_honeypot_is_relayed() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "203.0.113.14")
        .json(&fixtures::with(fixtures::valid_inquiry(), "honeypot", "   "))
        .await
        .assert_status_ok();

    assert_eq!(ctx.sent_count(), 1);
}

/// Markup in user input is escaped in the email body.
#[tokio::test]
async fn test_user_markup_is_escaped() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let body = fixtures::with(
        fixtures::valid_inquiry(),
        "description",
        "<script>alert('x')</script>\nsecond line",
    );
    server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "203.0.113.15")
        .json(&body)
        .await
        .assert_status_ok();

    let html = &ctx.captured()[0].html;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("<br>second line"));
}

/// Every service category is accepted.
#[tokio::test]
async fn test_all_service_categories_accepted() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let services = [
        "concept-design",
        "schematic-design",
        "construction-documentation",
        "3d-visualization",
        "interior-design",
    ];
    for (i, service) in services.iter().enumerate() {
        server
            .post("/api/contact")
            .add_header("X-Forwarded-For", format!("203.0.113.{}", 20 + i))
            .json(&fixtures::with(fixtures::valid_inquiry(), "service", service))
            .await
            .assert_status_ok();
    }

    assert_eq!(ctx.sent_count(), services.len());
}
