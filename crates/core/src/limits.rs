//! Request and rate limits for the inquiry relay.
//!
//! Field minimums live on `InquiryForm`'s `#[validate]` attributes.

// === Request Limits ===

/// Maximum request body size in bytes (64KB).
///
/// A filled-in contact form is a few hundred bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

// === Rate Limiting ===

/// Requests allowed per client inside one window.
pub const RATE_LIMIT_MAX_REQUESTS: usize = 5;

/// Trailing window length in seconds.
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Client key used when no forwarded address is present.
///
/// Every such client shares one quota bucket.
pub const UNKNOWN_CLIENT: &str = "unknown";
