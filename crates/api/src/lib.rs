//! HTTP API layer for the inquiry relay.

pub mod extractors;
pub mod middleware;
pub mod relay;
pub mod response;
pub mod routes;
pub mod state;

pub use relay::{relay_inquiry, RelayOutcome};
pub use routes::router;
pub use state::AppState;
