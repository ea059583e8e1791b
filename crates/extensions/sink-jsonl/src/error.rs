//! JSON lines sink errors.

use thiserror::Error;

/// Errors raised while setting up or writing the JSON lines output.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
