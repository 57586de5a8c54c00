//! Serve command: MCP over stdin/stdout until stdin closes.

use tracing::info;

use litcal_server::McpServer;

use crate::config::AppConfig;
use crate::error::CliResult;

pub async fn run(config: &AppConfig) -> CliResult<()> {
    let dispatcher = super::build_dispatcher(config)?;
    info!(
        base_url = %config.api.base_url,
        cache_enabled = dispatcher.cache().is_enabled(),
        cache_ttl_secs = dispatcher.cache().ttl().as_secs(),
        default_locale = %dispatcher.config().default_locale,
        "Starting litcal-mcp"
    );

    McpServer::new(dispatcher).serve_stdio().await?;

    info!("Server stopped");
    Ok(())
}
