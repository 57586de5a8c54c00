//! Wire types and framing for the litcal-mcp stdio transport.
//!
//! # Protocol Overview
//!
//! The server speaks JSON-RPC 2.0 with the Model Context Protocol method set.
//! Messages are newline-delimited JSON: one complete message per line, with
//! no embedded newlines (serde_json never emits any in compact mode).
//!
//! Supported methods:
//! - `initialize` / `notifications/initialized`
//! - `ping`
//! - `tools/list`
//! - `tools/call`
//!
//! # Example
//!
//! ```rust
//! use litcal_protocol::{JsonRpcRequest, encode_message, decode_message};
//!
//! let request = JsonRpcRequest::new(1, "ping", None);
//! let line = encode_message(&request).unwrap();
//! let decoded: JsonRpcRequest = decode_message(&line).unwrap();
//! assert_eq!(decoded.method, "ping");
//! ```

mod error;
mod framing;
mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use framing::{LineReader, LineWriter, decode_message, encode_message};
pub use types::{
    CallToolParams, CallToolResult, ErrorCode, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolContent, ToolSchema,
    ToolsCapability,
};

/// MCP protocol revision announced during `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC version string.
pub const JSONRPC_VERSION: &str = "2.0";

/// Maximum length of one message line (1 MB).
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;
