//! Protocol error types.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while reading or writing messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Line exceeds maximum allowed size.
    #[error("message too large: {size} bytes (max: {max})")]
    MessageTooLarge { size: usize, max: usize },

    /// Failed to serialize or parse JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Line is not valid UTF-8.
    #[error("message is not valid UTF-8")]
    InvalidUtf8,

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Blank line received.
    #[error("empty message")]
    EmptyMessage,
}
