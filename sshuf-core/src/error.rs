//! Error types for the shuffle core

use thiserror::Error;

/// Errors surfaced by the shuffle core
///
/// Both kinds terminate a run. Configuration errors are raised before any
/// record is accepted; random source errors can only occur while seeding.
#[derive(Error, Debug)]
pub enum ShuffleError {
    /// Rejected configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The entropy source could not seed the generator
    #[error("random source failure: {0}")]
    RandomSource(#[from] rand::Error),
}

impl ShuffleError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ShuffleError::InvalidConfiguration(msg.into())
    }
}

/// Result type for shuffle operations
pub type Result<T> = std::result::Result<T, ShuffleError>;
