//! Mail configuration.

use serde::{Deserialize, Serialize};

use crate::error::{MailError, Result};

/// Which transport delivers inquiries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Authenticated SMTP relay
    #[default]
    Smtp,
    /// Log the composed message instead of sending it (development)
    Log,
}

/// Outbound mail configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub transport: TransportKind,
    /// SMTP relay host
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP port. 465 uses implicit TLS, anything else STARTTLS.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Sender account, also used as the From address
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Mailbox that receives inquiries. Falls back to the sender account.
    #[serde(default)]
    pub destination: Option<String>,
    /// SMTP command timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            destination: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Sender and recipient for relayed inquiries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRoute {
    pub from: String,
    pub to: String,
}

impl MailRoute {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl MailConfig {
    /// Resolves the From/To pair.
    ///
    /// The destination falls back to the sender account when unset or blank.
    pub fn route(&self) -> Result<MailRoute> {
        let from = self
            .username
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| MailError::config("mail.username (EMAIL_USER) is not set"))?;

        let to = self
            .destination
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(from);

        Ok(MailRoute::new(from, to))
    }

    /// Whether the relay connects with implicit TLS rather than STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.smtp_port == 465
    }

    /// Checks that the selected transport has what it needs.
    pub fn validate(&self) -> Result<()> {
        self.route()?;

        if self.transport == TransportKind::Smtp
            && self.password.as_deref().map_or(true, |p| p.is_empty())
        {
            return Err(MailError::config(
                "mail.password (EMAIL_PASSWORD) is required for the smtp transport",
            ));
        }

        Ok(())
    }
}
