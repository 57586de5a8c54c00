//! Tools command.

use litcal_protocol::ListToolsResult;
use litcal_server::tool_schemas;

use crate::error::{CliError, CliResult};

/// Prints the `tools/list` payload.
pub fn list() -> CliResult<()> {
    println!("{}", render()?);
    Ok(())
}

fn render() -> CliResult<String> {
    let result = ListToolsResult {
        tools: tool_schemas(),
    };
    serde_json::to_string_pretty(&result)
        .map_err(|e| CliError::config(format!("failed to serialize tool schemas: {}", e)))
}
