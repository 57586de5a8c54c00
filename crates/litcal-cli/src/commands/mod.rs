//! Subcommand implementations.

pub mod call;
pub mod config;
pub mod serve;
pub mod tools;

use std::sync::Arc;

use litcal_server::ToolDispatcher;
use litcal_upstream::LitCalClient;

use crate::config::AppConfig;
use crate::error::CliResult;

/// Builds a dispatcher backed by the live API client.
pub fn build_dispatcher(config: &AppConfig) -> CliResult<ToolDispatcher> {
    let client = LitCalClient::new(config.upstream_config()?)?;
    Ok(ToolDispatcher::new(Arc::new(client), config.server_config()))
}
