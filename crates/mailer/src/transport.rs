//! Mail transport abstraction.

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::message::OutboundEmail;

/// Delivers a composed message.
///
/// A send is a single all-or-nothing call; callers do not retry.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Sends one message.
    async fn send(&self, email: OutboundEmail) -> Result<()>;

    /// Verifies the transport can reach its server.
    async fn check_connection(&self) -> bool {
        true
    }

    /// Short transport name for logs and health output.
    fn name(&self) -> &'static str;
}

/// Transport that logs messages instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct LogTransport;

impl LogTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailTransport for LogTransport {
    async fn send(&self, email: OutboundEmail) -> Result<()> {
        info!(
            to = %email.to,
            reply_to = email.reply_to.as_deref().unwrap_or("none"),
            subject = %email.subject,
            body_len = email.html.len(),
            "Mail transport is 'log', message not sent"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
