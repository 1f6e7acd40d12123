//! Error types for calgrid.

use thiserror::Error;

/// Errors that can occur outside the conflict protocol.
///
/// Scheduling conflicts are not errors in this sense; see [`crate::store::Conflict`].
#[derive(Error, Debug)]
pub enum CalGridError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calgrid operations.
pub type CalGridResult<T> = Result<T, CalGridError>;
