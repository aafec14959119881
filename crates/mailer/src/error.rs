//! Mail errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MailError>;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail configuration error: {0}")]
    Config(String),

    #[error("invalid address {address:?}: {reason}")]
    Address { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("failed to send message: {0}")]
    Send(String),
}

impl MailError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn address(address: impl Into<String>, reason: impl ToString) -> Self {
        Self::Address {
            address: address.into(),
            reason: reason.to_string(),
        }
    }
}

/// Any mail failure while relaying is a dispatch failure to the caller.
impl From<MailError> for relay_core::Error {
    fn from(err: MailError) -> Self {
        relay_core::Error::transport(err.to_string())
    }
}
