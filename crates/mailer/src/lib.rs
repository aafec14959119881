//! Outbound mail for the inquiry relay.
//!
//! Inquiries are composed into a fixed HTML template and handed to a
//! [`MailTransport`]. Production uses SMTP; development can log instead.

pub mod config;
pub mod error;
pub mod health;
pub mod message;
pub mod smtp;
pub mod transport;

pub use config::*;
pub use error::{MailError, Result};
pub use message::*;
pub use smtp::SmtpTransport;
pub use transport::*;
