//! Mock implementations for testing.

use async_trait::async_trait;
use mailer::{MailError, MailTransport, OutboundEmail};
use parking_lot::Mutex;
use std::sync::Arc;

/// Mock transport that captures emails in memory.
///
/// Implements the same `MailTransport` trait as `SmtpTransport`, so tests
/// see exactly the message that would be handed to the SMTP relay.
#[derive(Clone)]
pub struct MockTransport {
    /// All emails sent through this transport.
    emails: Arc<Mutex<Vec<OutboundEmail>>>,
    /// Simulate failures if set.
    should_fail: Arc<Mutex<bool>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            emails: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Get all captured emails.
    pub fn captured(&self) -> Vec<OutboundEmail> {
        self.emails.lock().clone()
    }

    /// Get the count of captured emails.
    pub fn sent_count(&self) -> usize {
        self.emails.lock().len()
    }

    /// Set failure mode for testing error handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailTransport for MockTransport {
    async fn send(&self, email: OutboundEmail) -> mailer::Result<()> {
        if *self.should_fail.lock() {
            return Err(MailError::Send(
                "535-5.7.8 Username and Password not accepted".into(),
            ));
        }

        self.emails.lock().push(email);
        Ok(())
    }

    async fn check_connection(&self) -> bool {
        !*self.should_fail.lock()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutboundEmail {
        OutboundEmail {
            from: "studio@example.com".into(),
            to: "architect@example.com".into(),
            reply_to: None,
            subject: "New Project Inquiry from Jane Doe".into(),
            html: "<p>hello</p>".into(),
        }
    }

    #[tokio::test]
    async fn test_mock_transport_captures_emails() {
        let mock = MockTransport::new();

        mock.send(email()).await.unwrap();
        assert_eq!(mock.sent_count(), 1);
        assert_eq!(mock.captured()[0].to, "architect@example.com");
    }

    #[tokio::test]
    async fn test_mock_transport_failure_mode() {
        let mock = MockTransport::new();
        mock.set_should_fail(true);

        assert!(mock.send(email()).await.is_err());
        assert!(!mock.check_connection().await);
        assert_eq!(mock.sent_count(), 0);
    }
}
