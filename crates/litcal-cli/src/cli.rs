//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// litcal-mcp - Liturgical Calendar tools over the Model Context Protocol
#[derive(Debug, Parser)]
#[command(name = "litcal-mcp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "LITCAL_MCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log format: pretty, compact or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,

    // --- API flags ---
    /// Liturgical Calendar API root
    #[arg(long, env = "LITCAL_API_URL")]
    pub base_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    // --- Cache flags ---
    /// How long upstream responses stay cached, in minutes
    #[arg(long, value_name = "MINUTES")]
    pub cache_ttl: Option<u64>,

    /// Disable the response cache
    #[arg(long)]
    pub no_cache: bool,

    /// Locale used when a tool call does not pass one
    #[arg(long)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Overlays command-line values on top of the file configuration.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(ref url) = self.base_url {
            config.api.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.api.timeout_secs = timeout;
        }
        if let Some(ttl) = self.cache_ttl {
            config.cache.ttl_minutes = ttl;
        }
        if self.no_cache {
            config.cache.enabled = false;
        }
        if let Some(ref locale) = self.locale {
            config.server.default_locale = locale.clone();
        }
        if let Some(ref format) = self.log_format {
            config.logging.format = format.clone();
        }
        if self.debug {
            config.logging.level = "debug".to_string();
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve MCP over stdin/stdout (default)
    Serve,

    /// Print the tool schemas as JSON
    Tools,

    /// Run one tool against the live API and print its output
    Call {
        /// Tool name, e.g. get_general_calendar
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["litcal-mcp"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.no_cache);
    }

    #[test]
    fn call_with_args() {
        let cli = Cli::try_parse_from([
            "litcal-mcp",
            "call",
            "get_national_calendar",
            "--args",
            r#"{"nation":"IT"}"#,
        ])
        .unwrap();
        match cli.command {
            Some(Command::Call { tool, args }) => {
                assert_eq!(tool, "get_national_calendar");
                assert_eq!(args, r#"{"nation":"IT"}"#);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn call_args_default_to_empty_object() {
        let cli = Cli::try_parse_from(["litcal-mcp", "call", "list_available_calendars"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Call { ref args, .. }) if args == "{}"));
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "litcal-mcp",
            "--base-url",
            "http://localhost:8080/api",
            "--timeout",
            "5",
            "--cache-ttl",
            "10",
            "--no-cache",
            "--locale",
            "it",
            "--log-format",
            "json",
            "--debug",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply_to(&mut config);

        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.cache.ttl_minutes, 10);
        assert!(!config.cache.enabled);
        assert_eq!(config.server.default_locale, "it");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = Cli::try_parse_from(["litcal-mcp", "tools"]).unwrap();
        let mut config = AppConfig::default();
        config.server.default_locale = "la".to_string();
        cli.apply_to(&mut config);
        assert_eq!(config.server.default_locale, "la");
        assert!(config.cache.enabled);
    }
}
