//! Upstream API configuration.

use std::time::Duration;
use url::Url;

use crate::error::{UpstreamError, UpstreamResult};

/// Configuration for the Liturgical Calendar API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// API root; endpoint paths are appended to it.
    pub base_url: Url,

    /// Request timeout. An in-flight request is aborted once it elapses.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl UpstreamConfig {
    /// Public API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://litcal.johnromanodorazio.com/api/dev";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration for the given API root.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL does not parse or is not
    /// http(s).
    pub fn new(base_url: impl AsRef<str>) -> UpstreamResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url.as_ref())?,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        })
    }

    /// Creates a configuration pointing at the public API.
    pub fn public() -> UpstreamResult<Self> {
        Self::new(Self::DEFAULT_BASE_URL)
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_str(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

/// Parses and checks an API root URL.
pub fn parse_base_url(text: &str) -> UpstreamResult<Url> {
    let url = Url::parse(text.trim()).map_err(|e| {
        UpstreamError::configuration(format!("Invalid API base URL '{text}': {e}")).with_source(e)
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UpstreamError::configuration(format!(
            "Unsupported API URL scheme '{other}', expected http or https"
        ))),
    }
}

/// `litcal-mcp/<version>`
pub fn default_user_agent() -> String {
    format!("litcal-mcp/{}", env!("CARGO_PKG_VERSION"))
}
