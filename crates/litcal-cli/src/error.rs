//! CLI error types.

use thiserror::Error;

use litcal_core::TracingError;
use litcal_server::ServerError;
use litcal_upstream::UpstreamError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by the `litcal-mcp` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Upstream client setup failed.
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// The serve loop failed.
    #[error("server error: {0}")]
    Server(#[from] ServerError),

    /// Logging could not be initialized.
    #[error("logging error: {0}")]
    Tracing(#[from] TracingError),

    /// Bad command-line input.
    #[error("invalid arguments: {0}")]
    Arguments(String),

    /// A one-shot tool call reported an error.
    #[error("tool failed: {0}")]
    Tool(String),
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn stdio_failures_arrive_through_the_server() {
        let err = CliError::from(ServerError::from(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "stdout closed",
        )));
        assert!(matches!(err, CliError::Server(ServerError::Io(_))));
        assert_eq!(err.to_string(), "server error: IO error: stdout closed");
    }

    #[test]
    fn config_helper() {
        let err = CliError::config("api.timeout_secs must be greater than 0");
        assert_eq!(
            err.to_string(),
            "configuration error: api.timeout_secs must be greater than 0"
        );
    }
}
