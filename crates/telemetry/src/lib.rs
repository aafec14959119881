//! Internal telemetry for the inquiry relay.
//!
//! Structured logging, in-process counters, and component health. Nothing
//! here leaves the process; counters surface through logs and `/health`.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
