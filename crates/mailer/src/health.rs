//! Mail transport health checks.

use tracing::{debug, error};

use crate::transport::MailTransport;

/// Check that the transport can reach its server.
pub async fn check_connection(transport: &dyn MailTransport) -> bool {
    if transport.check_connection().await {
        debug!(transport = transport.name(), "Mail transport healthy");
        true
    } else {
        error!(transport = transport.name(), "Mail transport unreachable");
        false
    }
}
