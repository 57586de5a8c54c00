//! Configuration file.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/litcal-mcp/config.toml` by default. Every section and key is
//! optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::Level;

use litcal_core::{TracingConfig, TracingOutputFormat};
use litcal_server::ServerConfig;
use litcal_upstream::UpstreamConfig;

use crate::error::{CliError, CliResult};

/// Configuration for litcal-mcp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Upstream API settings.
    pub api: ApiSettings,

    /// Response cache settings.
    pub cache: CacheSettings,

    /// Tool defaults.
    pub server: ServerSettings,

    /// Log settings.
    pub logging: LoggingSettings,
}

/// Upstream API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// API root.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent override.
    pub user_agent: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: UpstreamConfig::DEFAULT_BASE_URL.to_string(),
            timeout_secs: UpstreamConfig::DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

/// Response cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Entry lifetime in minutes.
    pub ttl_minutes: u64,

    /// Whether caching is on.
    pub enabled: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_minutes: ServerConfig::DEFAULT_CACHE_TTL_MINUTES,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Locale used when a tool call does not pass one.
    pub default_locale: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            default_locale: ServerConfig::DEFAULT_LOCALE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is unset.
    pub level: String,

    /// `pretty`, `compact` or `json`.
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the default path, or defaults if there is
    /// no file there.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            CliError::config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("litcal-mcp")
    }

    /// Builds the upstream client configuration.
    pub fn upstream_config(&self) -> CliResult<UpstreamConfig> {
        if self.api.timeout_secs == 0 {
            return Err(CliError::config("api.timeout_secs must be greater than 0"));
        }

        let mut config = UpstreamConfig::new(&self.api.base_url)?
            .with_timeout(Duration::from_secs(self.api.timeout_secs));
        if let Some(ref agent) = self.api.user_agent {
            config = config.with_user_agent(agent);
        }
        Ok(config)
    }

    /// Builds the tool server configuration.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new()
            .with_default_locale(self.server.default_locale.trim())
            .with_cache_ttl(Duration::from_secs(self.cache.ttl_minutes.saturating_mul(60)))
            .with_cache_enabled(self.cache.enabled && self.cache.ttl_minutes > 0)
    }

    /// Builds the logging configuration. `debug` also turns on file and line
    /// locations.
    pub fn tracing_config(&self, debug: bool) -> CliResult<TracingConfig> {
        let level: Level = self.logging.level.trim().parse().map_err(|_| {
            CliError::config(format!(
                "invalid logging.level '{}', expected one of: trace, debug, info, warn, error",
                self.logging.level
            ))
        })?;
        let format: TracingOutputFormat = self.logging.format.parse()?;

        let base = if debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::server()
        };
        Ok(base.with_level(level).with_format(format))
    }

    /// Checks every setting without touching the network.
    pub fn validate(&self) -> CliResult<()> {
        self.upstream_config()?;
        self.tracing_config(false)?;
        if self.server.default_locale.trim().is_empty() {
            return Err(CliError::config("server.default_locale must not be empty"));
        }
        Ok(())
    }
}
