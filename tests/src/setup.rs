//! Common test setup functions.

use api::{middleware::rate_limit::RateLimitConfig, router, AppState};
use axum::Router;
use mailer::{MailRoute, MailTransport, OutboundEmail};
use std::net::SocketAddr;
use std::sync::Arc;
use telemetry::health;

use crate::mocks::MockTransport;

pub const SENDER: &str = "studio@example.com";
pub const DESTINATION: &str = "architect@example.com";

/// Test context with a mock mail transport.
///
/// Uses the real Axum router with all middleware; only the SMTP hop is
/// replaced by `MockTransport`.
pub struct TestContext {
    pub mock_transport: Arc<MockTransport>,
    pub router: Router,
}

impl TestContext {
    /// Create a context with the default rate limit.
    pub fn new() -> Self {
        Self::with_rate_limit(RateLimitConfig::default())
    }

    /// Create a context with a custom rate limit.
    pub fn with_rate_limit(config: RateLimitConfig) -> Self {
        // Mirrors the startup connection check in the binary.
        health().mail.set_healthy();

        let mock_transport = Arc::new(MockTransport::new());
        let state = AppState::with_rate_limit(
            mock_transport.clone() as Arc<dyn MailTransport>,
            MailRoute::new(SENDER, DESTINATION),
            config,
        );

        Self {
            mock_transport,
            router: router(state),
        }
    }

    /// Get all emails captured by the mock transport.
    pub fn captured(&self) -> Vec<OutboundEmail> {
        self.mock_transport.captured()
    }

    /// Get count of captured emails.
    pub fn sent_count(&self) -> usize {
        self.mock_transport.sent_count()
    }

    /// Set the mock transport to fail (for error testing).
    pub fn set_transport_failure(&self, should_fail: bool) {
        self.mock_transport.set_should_fail(should_fail);
    }

    /// Serve the router on an ephemeral local port.
    pub async fn spawn(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let app = self.router.clone();

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        addr
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
