//! Inquiry relay pipeline.
//!
//! rate limit → read → parse/validate → honeypot → dispatch. Every request
//! that passes the rate limit is recorded before the body is looked at,
//! so oversized and malformed requests count against the quota.

use std::time::Instant;

use axum::body::Bytes;
use mailer::{inquiry_email, InquiryEnvelope};
use relay_core::{validate_inquiry_json, Error, Result};
use telemetry::metrics;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::middleware::rate_limit::RateDecision;
use crate::state::AppState;

/// How an accepted inquiry was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Emailed to the destination mailbox.
    Relayed { reference: Uuid },
    /// Honeypot was filled; dropped without sending.
    Suppressed,
}

/// Relays one request body from `client_id`.
///
/// `body` is the buffered body or the error reading it. The client is
/// admitted before either is looked at.
pub async fn relay_inquiry(
    state: &AppState,
    client_id: &str,
    body: Result<Bytes>,
) -> Result<RelayOutcome> {
    relay_inquiry_at(state, client_id, body, Instant::now()).await
}

/// Same as [`relay_inquiry`] with an explicit rate limiter clock.
pub async fn relay_inquiry_at(
    state: &AppState,
    client_id: &str,
    body: Result<Bytes>,
    now: Instant,
) -> Result<RelayOutcome> {
    metrics().inquiries_received.inc();

    let decision = state.rate_limiter.admit(client_id, now);
    if let Some(retry_after) = decision.retry_after_secs() {
        metrics().rate_limited_requests.inc();
        warn!(client = %client_id, retry_after, "Rate limit exceeded");
        return Err(Error::RateLimited { retry_after });
    }
    debug_assert_eq!(decision, RateDecision::Allowed);

    let submission = body
        .and_then(|body| validate_inquiry_json(&body))
        .map_err(|e| {
            metrics().validation_failures.inc();
            debug!(client = %client_id, error = %e, "Inquiry rejected");
            e
        })?;

    if submission.is_spam() {
        metrics().inquiries_suppressed.inc();
        info!(client = %client_id, "Honeypot filled, inquiry suppressed");
        return Ok(RelayOutcome::Suppressed);
    }

    let envelope = InquiryEnvelope::new(client_id);
    let email = inquiry_email(&submission, &envelope, &state.mail_route);

    let start = Instant::now();
    let sent = {
        let _in_flight = metrics().dispatches_in_flight.track();
        state.transport.send(email).await
    };
    let latency_ms = start.elapsed().as_millis() as u64;
    metrics().dispatch_latency_ms.observe(latency_ms);

    if let Err(e) = sent {
        metrics().dispatch_failures.inc();
        error!(
            reference = %envelope.reference,
            transport = state.transport.name(),
            error = %e,
            "Failed to send inquiry email"
        );
        return Err(Error::from(e));
    }

    metrics().inquiries_relayed.inc();
    info!(
        reference = %envelope.reference,
        service = %submission.service(),
        latency_ms,
        "Inquiry relayed"
    );

    Ok(RelayOutcome::Relayed {
        reference: envelope.reference,
    })
}
