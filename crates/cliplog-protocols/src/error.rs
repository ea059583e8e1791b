//! Error types for the cliplog protocol layer.

use thiserror::Error;

/// Protocol error type.
///
/// Logging operations never fail; these errors only surface when parsing
/// vocabulary names coming from configuration or replay scripts.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Unknown context key: {0}")]
    UnknownContextKey(String),

    #[error("Unknown log method: {0}")]
    UnknownMethod(String),

    #[error("Unknown trace level: {0}")]
    UnknownTraceLevel(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
