//! Log setup for the `litcal-mcp` binary.
//!
//! Stdout is the MCP transport, so every log line goes to stderr whatever
//! the format. `RUST_LOG` wins over the configured level.
//!
//! ```ignore
//! use litcal_core::tracing::{init_tracing, TracingConfig, TracingOutputFormat};
//!
//! init_tracing(TracingConfig::server().with_format(TracingOutputFormat::Json))?;
//! ```

use std::fmt;
use std::io;
use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self as layer_fmt, format::FmtSpan},
    prelude::*,
};

/// Crates whose events pass the default filter.
const LOG_TARGETS: [&str; 5] = [
    "litcal_cli",
    "litcal_core",
    "litcal_protocol",
    "litcal_server",
    "litcal_upstream",
];

#[derive(Debug, Error)]
pub enum TracingError {
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("unknown log format '{0}', expected one of: pretty, compact, json")]
    UnknownFormat(String),
}

/// Line layout of log output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Multi-line, for reading in a terminal.
    Pretty,
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

impl TracingOutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for TracingOutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TracingOutputFormat {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        [Self::Pretty, Self::Compact, Self::Json]
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TracingError::UnknownFormat(wanted.to_string()))
    }
}

/// How logs are filtered and laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level for the litcal crates when `RUST_LOG` is unset.
    pub default_level: Level,
    pub output_format: TracingOutputFormat,
    /// Print file and line of each event.
    pub show_source_location: bool,
    /// Emit an event when a span closes, with its busy/idle time.
    pub log_span_close: bool,
    /// Explicit filter directive. Replaces both `RUST_LOG` and `default_level`.
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            output_format: TracingOutputFormat::Compact,
            show_source_location: false,
            log_span_close: false,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    /// `--debug`: debug level with source locations.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            show_source_location: true,
            log_span_close: true,
            ..Self::default()
        }
    }

    /// The long-running stdio server.
    #[must_use]
    pub fn server() -> Self {
        Self {
            default_level: Level::INFO,
            log_span_close: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, directive: impl Into<String>) -> Self {
        self.env_filter = Some(directive.into());
        self
    }

    /// Directive used when neither `env_filter` nor `RUST_LOG` is set.
    pub fn default_directive(&self) -> String {
        let level = self.default_level.to_string().to_ascii_lowercase();
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn filter(&self) -> Result<EnvFilter, TracingError> {
        if let Some(ref directive) = self.env_filter {
            return Ok(EnvFilter::try_new(directive)?);
        }
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(self.default_directive())?),
        }
    }
}

/// Installs the global subscriber, writing to stderr.
///
/// # Errors
///
/// Fails if a subscriber is already installed or `env_filter` does not parse.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.filter()?;
    let span_events = if config.log_span_close {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let base = layer_fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_file(config.show_source_location)
        .with_line_number(config.show_source_location)
        .with_span_events(span_events);

    let output = match config.output_format {
        TracingOutputFormat::Pretty => base.pretty().boxed(),
        TracingOutputFormat::Compact => base.compact().boxed(),
        TracingOutputFormat::Json => base.json().boxed(),
    };

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(filter).with(output),
    )?;
    Ok(())
}
