//! Standardized API responses.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use relay_core::{ErrorCode, FieldError};
use serde::{Deserialize, Serialize};
use telemetry::MetricsSnapshot;

pub const MSG_SENT: &str = "Message sent successfully!";
pub const MSG_INVALID: &str = "Invalid form data";
pub const MSG_TOO_LARGE: &str = "Request body too large";
pub const MSG_RATE_LIMITED: &str = "Too many requests. Please try again later.";
pub const MSG_FAILED: &str = "Failed to send message. Please try again.";

/// Success response for the contact endpoint.
///
/// Relayed and honeypot-suppressed inquiries get the same body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: MSG_SENT.to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub mail_connected: bool,
    pub mail_transport: String,
    pub metrics: MetricsSnapshot,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

/// API error with client-facing code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
    pub retry_after: Option<u64>,
}

impl ApiError {
    /// Error whose status follows from its code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(code.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            response: ErrorResponse::new(message, code.code()),
            retry_after: None,
        }
    }

    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.response = self.response.with_details(details);
        self
    }

    pub fn with_retry_after(mut self, retry_after: u64) -> Self {
        self.retry_after = Some(retry_after);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.response)).into_response();

        // Add Retry-After header for rate limit responses
        if let Some(retry_after) = self.retry_after {
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

impl From<relay_core::Error> for ApiError {
    fn from(err: relay_core::Error) -> Self {
        let code = err.code();

        match err {
            relay_core::Error::Validation(errors) => {
                ApiError::new(code, MSG_INVALID).with_details(errors.into_inner())
            }
            relay_core::Error::MalformedBody(msg) => {
                ApiError::new(code, MSG_INVALID).with_details(vec![FieldError {
                    field: "body".to_string(),
                    code: "malformed_json".to_string(),
                    message: msg,
                }])
            }
            relay_core::Error::PayloadTooLarge { .. } => ApiError::new(code, MSG_TOO_LARGE),
            relay_core::Error::RateLimited { retry_after } => {
                ApiError::new(code, MSG_RATE_LIMITED).with_retry_after(retry_after)
            }
            // Transport detail stays in the logs.
            relay_core::Error::Transport(_) => ApiError::new(code, MSG_FAILED),
        }
    }
}
