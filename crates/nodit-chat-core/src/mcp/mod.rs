//! MCP (Model Context Protocol) client module
//!
//! Uses the official rmcp SDK to connect to the remote MCP server over
//! Streamable HTTP. The rest of the crate only sees the `ToolBackend` and
//! `McpConnector` traits, so the registry and orchestrator can run against
//! in-process backends in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use nodit_chat_core::mcp::McpClient;
//!
//! let client = McpClient::connect_http("https://example.test/mcp", logger).await?;
//! let tools = client.list_tools().await?;
//! let block = client.call_tool("get_block", json!({ "number": 100 })).await?;
//! ```

mod client;
mod backend;

pub use client::{McpClient, McpError, McpResult, tool_result_to_value};
pub use backend::{HttpConnector, McpConnector, ToolBackend};
