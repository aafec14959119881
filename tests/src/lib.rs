//! Shared helpers for the integration tests.

pub mod mocks;
pub mod setup;
