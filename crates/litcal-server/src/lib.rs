//! MCP server for the Liturgical Calendar API.
//!
//! This crate wires the pieces together:
//! - [`ResponseCache`]: TTL memoization of raw upstream payloads
//! - [`ToolDispatcher`]: tool name and arguments to normalized JSON text
//! - [`McpServer`]: the JSON-RPC loop on stdin/stdout

pub mod cache;
pub mod config;
pub mod error;
pub mod handler;
pub mod stdio;
pub mod tools;

pub use cache::{Clock, ManualClock, ResponseCache, SystemClock};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult, ToolError};
pub use handler::ToolDispatcher;
pub use stdio::McpServer;
pub use tools::{Tool, tool_schemas};
