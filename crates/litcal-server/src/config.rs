//! Server configuration.

use std::time::Duration;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Name reported in `initialize`.
    pub name: String,

    /// Version reported in `initialize`.
    pub version: String,

    /// Locale used when a tool call does not pass one.
    pub default_locale: String,

    /// How long upstream payloads stay cached.
    pub cache_ttl: Duration,

    /// Whether upstream payloads are cached at all.
    pub cache_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "litcal-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            default_locale: Self::DEFAULT_LOCALE.to_string(),
            cache_ttl: Duration::from_secs(Self::DEFAULT_CACHE_TTL_MINUTES * 60),
            cache_enabled: true,
        }
    }
}

impl ServerConfig {
    /// Default locale.
    pub const DEFAULT_LOCALE: &'static str = "en";

    /// Default cache TTL in minutes.
    pub const DEFAULT_CACHE_TTL_MINUTES: u64 = 60;

    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the default locale.
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Builder: set the cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Builder: enable or disable the cache.
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Builder: set the advertised server version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}
