//! Inquiry schema, validation, and error types for the contact relay.

pub mod error;
pub mod inquiry;
pub mod limits;
pub mod service;

pub use error::{Error, ErrorCode, Result};
pub use inquiry::*;
pub use service::*;
