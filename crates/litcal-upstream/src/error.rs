//! Error types for upstream API calls.

use std::fmt;
use thiserror::Error;

/// The category of an upstream error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamErrorCode {
    /// The request did not complete within the configured timeout.
    Timeout,
    /// Connection failed, DNS resolution, TLS, broken body stream.
    Network,
    /// Non-success HTTP status other than 404.
    HttpStatus,
    /// The requested calendar does not exist (404).
    NotFound,
    /// The body was not valid JSON.
    InvalidResponse,
    /// Invalid base URL or HTTP client setup.
    Configuration,
}

impl UpstreamErrorCode {
    /// Returns true if this error is transient and the request may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Network => "network_error",
            Self::HttpStatus => "http_status",
            Self::NotFound => "not_found",
            Self::InvalidResponse => "invalid_response",
            Self::Configuration => "configuration_error",
        }
    }
}

impl fmt::Display for UpstreamErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error raised while talking to the upstream API.
///
/// Displays as the bare message, since it ends up verbatim in tool output.
#[derive(Debug, Error)]
pub struct UpstreamError {
    code: UpstreamErrorCode,
    message: String,
    /// HTTP status, when the server answered.
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl UpstreamError {
    pub fn new(code: UpstreamErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorCode::Timeout, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorCode::Network, message)
    }

    /// Creates an error for a non-success HTTP status.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        let code = if status == 404 {
            UpstreamErrorCode::NotFound
        } else {
            UpstreamErrorCode::HttpStatus
        };
        Self {
            status: Some(status),
            ..Self::new(code, message)
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorCode::InvalidResponse, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorCode::Configuration, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> UpstreamErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A specialized Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
