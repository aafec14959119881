//! Typed client for `POST /api/contact`.
//!
//! Runs the shared inquiry validation before anything leaves the process,
//! then maps the relay's JSON responses to a [`SubmitOutcome`]. The form
//! is only borrowed, so a failed submission can be retried as-is.

use std::time::Duration;

use relay_core::{validate_inquiry, FieldError, FieldErrors, InquiryForm};
use reqwest::header::RETRY_AFTER;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Shown after a relayed inquiry.
pub const SUCCESS_NOTICE: &str = "Message sent successfully! We'll get back to you soon.";

/// Shown after any failed submission.
pub const FAILURE_NOTICE: &str = "Failed to send message. Please try again.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The relay accepted the inquiry.
    Sent,
    /// The honeypot was filled; nothing was sent.
    Skipped,
    /// Local validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The relay rejected the fields.
    Rejected(FieldErrors),
    /// Too many recent submissions from this client.
    RateLimited { retry_after: Option<u64> },
    /// Any other failure reported by the relay.
    Failed { status: u16, message: String },
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Transient notice for the user, if one should be shown.
    ///
    /// Field errors are shown next to their inputs instead.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Sent => Some(SUCCESS_NOTICE),
            Self::Skipped | Self::Invalid(_) => None,
            Self::Rejected(_) | Self::RateLimited { .. } | Self::Failed { .. } => {
                Some(FAILURE_NOTICE)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Option<Vec<FieldError>>,
}

/// Client for the contact endpoint.
#[derive(Debug, Clone)]
pub struct InquiryClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl InquiryClient {
    /// Creates a client for the relay at `base_url` (e.g. `https://studio.example`).
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Self::with_http_client(base_url, http)
    }

    /// Creates a client reusing an existing HTTP client.
    pub fn with_http_client(
        base_url: impl AsRef<str>,
        http: reqwest::Client,
    ) -> Result<Self, ClientError> {
        let raw = base_url.as_ref();
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: raw.to_string(),
            reason,
        };

        let mut base = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", base.scheme())));
        }
        if base.cannot_be_a_base() || base.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }

        // Keep any path prefix: join() replaces the last segment otherwise.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join("api/contact")
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Validates and submits an inquiry.
    pub async fn submit(&self, form: &InquiryForm) -> Result<SubmitOutcome, ClientError> {
        if let Err(errors) = validate_inquiry(form.clone()) {
            debug!(fields = ?errors.fields(), "Inquiry failed local validation");
            return Ok(SubmitOutcome::Invalid(errors));
        }

        // Any value at all, whitespace included, marks a bot.
        if form.honeypot.as_deref().is_some_and(|h| !h.is_empty()) {
            debug!("Honeypot filled, not submitting");
            return Ok(SubmitOutcome::Skipped);
        }

        let response = self.http.post(self.endpoint.clone()).json(form).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(SubmitOutcome::Sent);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body: Option<ErrorBody> = response.json().await.ok();

        warn!(
            status = status.as_u16(),
            error = body.as_ref().map(|b| b.error.as_str()).unwrap_or(""),
            "Inquiry submission failed"
        );

        let outcome = match status {
            StatusCode::BAD_REQUEST => SubmitOutcome::Rejected(FieldErrors::new(
                body.and_then(|b| b.details).unwrap_or_default(),
            )),
            StatusCode::TOO_MANY_REQUESTS => SubmitOutcome::RateLimited { retry_after },
            _ => SubmitOutcome::Failed {
                status: status.as_u16(),
                message: body
                    .map(|b| b.error)
                    .unwrap_or_else(|| status.to_string()),
            },
        };

        Ok(outcome)
    }
}
