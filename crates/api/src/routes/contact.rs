//! Contact form endpoint.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use relay_core::limits::MAX_BODY_BYTES;
use tracing::debug;

use crate::extractors::ClientIp;
use crate::relay::{relay_inquiry, RelayOutcome};
use crate::response::{ApiError, ContactResponse};
use crate::state::AppState;

/// POST /api/contact - Relay a project inquiry to the studio inbox.
///
/// Suppressed (honeypot) inquiries answer exactly like relayed ones so
/// automated submitters cannot tell they were filtered. Body read failures
/// are handed to the relay so they are rate limited like any request.
pub async fn contact_handler(
    State(state): State<AppState>,
    ClientIp(client_id): ClientIp,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let body = body.map_err(read_error);
    let outcome = relay_inquiry(&state, &client_id, body).await?;

    match outcome {
        RelayOutcome::Relayed { reference } => {
            debug!(client = %client_id, %reference, "Contact request relayed")
        }
        RelayOutcome::Suppressed => debug!(client = %client_id, "Contact request suppressed"),
    }

    Ok(Json(ContactResponse::sent()))
}

fn read_error(rejection: BytesRejection) -> relay_core::Error {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        relay_core::Error::PayloadTooLarge {
            limit: MAX_BODY_BYTES,
        }
    } else {
        relay_core::Error::malformed_body(rejection.body_text())
    }
}
