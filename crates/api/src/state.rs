//! Application state shared across handlers.

use crate::middleware::rate_limit::{RateLimitConfig, SharedRateLimiter, SlidingWindowLimiter};
use mailer::{MailRoute, MailTransport};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Per-client request history
    pub rate_limiter: SharedRateLimiter,
    /// Outbound mail (SMTP in production, recording mock in tests)
    pub transport: Arc<dyn MailTransport>,
    /// Sender account and destination mailbox
    pub mail_route: MailRoute,
}

impl AppState {
    pub fn new(transport: Arc<dyn MailTransport>, mail_route: MailRoute) -> Self {
        Self::with_rate_limit(transport, mail_route, RateLimitConfig::default())
    }

    /// Create with custom rate limit config.
    pub fn with_rate_limit(
        transport: Arc<dyn MailTransport>,
        mail_route: MailRoute,
        rate_config: RateLimitConfig,
    ) -> Self {
        Self::with_rate_limiter(
            transport,
            mail_route,
            Arc::new(SlidingWindowLimiter::new(rate_config)),
        )
    }

    /// Create with an existing rate limit store.
    pub fn with_rate_limiter(
        transport: Arc<dyn MailTransport>,
        mail_route: MailRoute,
        rate_limiter: SharedRateLimiter,
    ) -> Self {
        Self {
            rate_limiter,
            transport,
            mail_route,
        }
    }
}
