//! MCP serve loop over stdin/stdout.
//!
//! Requests are handled one at a time in arrival order. A notification never
//! gets a reply. Malformed input is answered with a JSON-RPC error and the
//! loop keeps going; only an IO failure or EOF ends it.

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tracing::{debug, info, warn};

use litcal_protocol::{
    CallToolParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    LineReader, LineWriter, ListToolsResult, ProtocolError, JSONRPC_VERSION, decode_message,
};

use crate::error::ServerResult;
use crate::handler::ToolDispatcher;
use crate::tools::tool_schemas;

/// An MCP server answering tool calls through a [`ToolDispatcher`].
pub struct McpServer {
    dispatcher: ToolDispatcher,
}

impl McpServer {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    /// Serves on the process's stdin and stdout until stdin closes.
    pub async fn serve_stdio(&self) -> ServerResult<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serves until `reader` reaches EOF.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> ServerResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = LineReader::new(reader);
        let mut writer = LineWriter::new(writer);
        info!(
            name = %self.dispatcher.config().name,
            version = %self.dispatcher.config().version,
            "MCP server listening on stdio"
        );

        loop {
            let response = match reader.read_line().await {
                Ok(Some(line)) => self.handle_line(&line).await,
                Ok(None) => {
                    info!("stdin closed, shutting down");
                    return Ok(());
                }
                Err(ProtocolError::MessageTooLarge { size, max }) => {
                    Some(oversized(size, max))
                }
                Err(e) => return Err(e.into()),
            };

            if let Some(response) = response {
                writer.write_message(&response).await?;
            }
        }
    }

    /// Handles one raw line, with or without its line ending. Returns `None`
    /// when no reply is due.
    pub async fn handle_line(&self, line: &[u8]) -> Option<JsonRpcResponse> {
        let value: Value = match decode_message(line) {
            Ok(value) => value,
            Err(ProtocolError::EmptyMessage) => return None,
            Err(ProtocolError::MessageTooLarge { size, max }) => return Some(oversized(size, max)),
            Err(e) => {
                warn!(error = %e, "Unparseable message");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        let id = value.get("id").cloned();
        let request = match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) if request.jsonrpc == JSONRPC_VERSION => request,
            Ok(request) => {
                return id.map(|id| {
                    JsonRpcResponse::failure(
                        id,
                        JsonRpcError::invalid_request(format!(
                            "Unsupported jsonrpc version '{}'",
                            request.jsonrpc
                        )),
                    )
                });
            }
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    id.unwrap_or(Value::Null),
                    JsonRpcError::invalid_request(e.to_string()),
                ));
            }
        };

        self.handle_request(request).await
    }

    /// Handles a decoded request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "Notification received");
            return None;
        };

        debug!(method = %request.method, id = %id, "Request received");
        let outcome = match request.method.as_str() {
            "initialize" => to_result(&InitializeResult::new(
                &self.dispatcher.config().name,
                &self.dispatcher.config().version,
            )),
            "ping" => Ok(Value::Object(serde_json::Map::new())),
            "tools/list" => to_result(&ListToolsResult {
                tools: tool_schemas(),
            }),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid tools/call params: {e}")))?;

        let result = self
            .dispatcher
            .call(&params.name, params.arguments.as_ref())
            .await;
        to_result(&result)
    }
}

fn oversized(size: usize, max: usize) -> JsonRpcResponse {
    warn!(size = size, max = max, "Discarding oversized message");
    JsonRpcResponse::failure(
        Value::Null,
        JsonRpcError::invalid_request(format!("Message too large: {size} bytes (max: {max})")),
    )
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
