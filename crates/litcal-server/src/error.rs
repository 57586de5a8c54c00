//! Server error types.

use std::io;
use thiserror::Error;

use litcal_core::{NormalizeError, ValidationError};
use litcal_upstream::UpstreamError;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that end the serve loop.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error on stdin/stdout.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Protocol error (framing, encoding).
    #[error("Protocol error: {0}")]
    Protocol(#[from] litcal_protocol::ProtocolError),
}

/// A failed tool invocation.
///
/// Never leaves the dispatcher: it is rendered as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// Arguments were not an object of scalars.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_errors_name_their_source() {
        let err = ServerError::from(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"));
        assert_eq!(err.to_string(), "IO error: stdout closed");

        let err = ServerError::from(litcal_protocol::ProtocolError::EmptyMessage);
        assert!(err.to_string().starts_with("Protocol error: "));
    }

    #[test]
    fn tool_errors_keep_inner_message() {
        let err = ToolError::from(ValidationError::MissingDiocese);
        assert_eq!(err.to_string(), "Diocese code is required");

        let err = ToolError::from(NormalizeError::NoCalendarData);
        assert_eq!(err.to_string(), "No calendar data available");

        let err = ToolError::from(UpstreamError::timeout("Request timed out after 30s"));
        assert_eq!(err.to_string(), "Request timed out after 30s");
    }
}
