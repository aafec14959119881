//! SMTP transport.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

use crate::config::MailConfig;
use crate::error::{MailError, Result};
use crate::message::OutboundEmail;
use crate::transport::MailTransport;

/// Authenticated SMTP relay transport.
pub struct SmtpTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpTransport {
    /// Creates a transport from configuration.
    ///
    /// Fails if credentials are missing. Does not connect.
    pub fn new(config: &MailConfig) -> Result<Self> {
        config.validate()?;

        let username = config.username.clone().unwrap_or_default();
        let password = config.password.clone().unwrap_or_default();

        let builder = if config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        }
        .map_err(|e| MailError::config(format!("invalid SMTP relay {}: {}", config.smtp_host, e)))?;

        let inner = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(username, password))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self {
            inner,
            host: config.smtp_host.clone(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

/// Converts a composed email into a MIME message.
///
/// An unparseable reply-to address is dropped rather than failing the send.
pub fn build_message(email: &OutboundEmail) -> Result<Message> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|e| MailError::address(&email.from, e))?;
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|e| MailError::address(&email.to, e))?;

    let mut builder = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_HTML);

    if let Some(reply_to) = &email.reply_to {
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => debug!(error = %e, "Dropping unparseable Reply-To"),
        }
    }

    builder
        .body(email.html.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn send(&self, email: OutboundEmail) -> Result<()> {
        let message = build_message(&email)?;

        let response = self
            .inner
            .send(message)
            .await
            .map_err(|e| MailError::Send(e.to_string()))?;

        debug!(host = %self.host, code = %response.code(), "SMTP relay accepted message");
        Ok(())
    }

    async fn check_connection(&self) -> bool {
        match self.inner.test_connection().await {
            Ok(connected) => connected,
            Err(e) => {
                warn!(host = %self.host, error = %e, "SMTP connection test failed");
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
