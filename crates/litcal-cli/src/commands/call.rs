//! Call command: one tool invocation against the live API.

use serde_json::Value;
use tracing::debug;

use litcal_server::ToolDispatcher;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Runs `tool` with `args` (a JSON object) and prints the text payload.
///
/// Exits with an error when the tool is unknown or its payload is an
/// `{"error": ...}` object; the payload is still printed.
pub async fn run(config: &AppConfig, tool: &str, args: &str) -> CliResult<()> {
    let arguments = parse_arguments(args)?;
    let dispatcher = super::build_dispatcher(config)?;
    let text = invoke(&dispatcher, tool, &arguments).await?;
    println!("{}", text);
    Ok(())
}

fn parse_arguments(args: &str) -> CliResult<Value> {
    let value: Value = serde_json::from_str(args)
        .map_err(|e| CliError::Arguments(format!("--args is not valid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(CliError::Arguments(
            "--args must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}

async fn invoke(dispatcher: &ToolDispatcher, tool: &str, arguments: &Value) -> CliResult<String> {
    let result = dispatcher.call(tool, Some(arguments)).await;
    let text = result.first_text().unwrap_or_default().to_string();
    debug!(tool = %tool, bytes = text.len(), "Tool returned");

    if result.is_error == Some(true) {
        return Err(CliError::Tool(error_message(&text).unwrap_or(text)));
    }
    if let Some(message) = error_message(&text) {
        println!("{}", text);
        return Err(CliError::Tool(message));
    }
    Ok(text)
}

fn error_message(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}
