//! Unified error types for the inquiry relay.
//!
//! Error codes:
//! - VALID_001: Invalid form data
//! - VALID_002: Request body too large
//! - RATE_001: Rate limit exceeded
//! - MAIL_001: Outbound mail dispatch failed

use thiserror::Error;

use crate::inquiry::FieldErrors;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Client-facing error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// VALID_001: Form data failed validation or could not be parsed
    InvalidForm,
    /// VALID_002: Body exceeds the size cap
    PayloadTooLarge,
    /// RATE_001: Too many requests from this client
    RateLimited,
    /// MAIL_001: Outbound mail dispatch failed
    MailFailed,
}

impl ErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidForm => "VALID_001",
            Self::PayloadTooLarge => "VALID_002",
            Self::RateLimited => "RATE_001",
            Self::MailFailed => "MAIL_001",
        }
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidForm => 400,
            Self::PayloadTooLarge => 413,
            Self::RateLimited => 429,
            Self::MailFailed => 500,
        }
    }
}

/// Unified error type for the inquiry relay.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more fields violate the inquiry schema.
    #[error("invalid form data: {0}")]
    Validation(FieldErrors),

    /// The body is not a JSON inquiry.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The body exceeds `limit` bytes.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// The client exhausted its quota for the current window.
    #[error("rate limited: retry after {retry_after}s")]
    RateLimited { retry_after: u64 },

    /// The mail transport rejected or failed the dispatch.
    #[error("mail transport error: {0}")]
    Transport(String),
}

impl Error {
    pub fn malformed_body(msg: impl Into<String>) -> Self {
        Self::MalformedBody(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Get the client-facing code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) => ErrorCode::InvalidForm,
            Self::PayloadTooLarge { .. } => ErrorCode::PayloadTooLarge,
            Self::RateLimited { .. } => ErrorCode::RateLimited,
            Self::Transport(_) => ErrorCode::MailFailed,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        self.code().http_status()
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedBody(err.to_string())
    }
}
