//! MCP client using the official rmcp SDK

use std::sync::Arc;

use rmcp::{
    ServiceExt,
    model::{
        CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Implementation,
        RawContent, Tool,
    },
    service::{ClientInitializeError, RunningService},
    RoleClient,
};
use serde_json::Value;
use thiserror::Error;

use crate::logging::Logger;
use crate::types::ToolDescriptor;

/// MCP client errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Tool call failed: {0}")]
    ToolCallFailed(String),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

pub type McpResult<T> = Result<T, McpError>;

impl From<ClientInitializeError> for McpError {
    fn from(err: ClientInitializeError) -> Self {
        match err {
            // The server could not be reached or hung up before the handshake finished
            ClientInitializeError::TransportError { .. } | ClientInitializeError::ConnectionClosed(_) => {
                McpError::ConnectionFailed(err.to_string())
            }
            other => McpError::InitializationFailed(other.to_string()),
        }
    }
}

/// MCP client for the remote tool server
pub struct McpClient {
    /// The underlying rmcp running service
    client: RunningService<RoleClient, ClientInfo>,
    logger: Arc<dyn Logger>,
}

fn client_info() -> ClientInfo {
    ClientInfo {
        meta: None,
        protocol_version: Default::default(),
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: "nodit-chat".to_string(),
            title: Some("Nodit MCP Chat".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            website_url: None,
            icons: None,
        },
    }
}

impl McpClient {
    /// Connect to an MCP server over HTTP (Streamable HTTP transport)
    pub async fn connect_http(url: &str, logger: Arc<dyn Logger>) -> McpResult<Self> {
        use rmcp::transport::StreamableHttpClientTransport;

        logger.info(&format!("[McpClient] Connecting to HTTP: {}", url));

        let transport = StreamableHttpClientTransport::from_uri(url);

        let client = client_info()
            .serve(transport)
            .await
            .map_err(McpError::from)?;

        logger.info("[McpClient] Connected and initialized successfully");

        Ok(Self { client, logger })
    }

    /// List all available tools
    pub async fn list_tools(&self) -> McpResult<Vec<Tool>> {
        let result = self
            .client
            .list_tools(Default::default())
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;

        self.logger.info(&format!("[McpClient] Listed {} tools", result.tools.len()));

        Ok(result.tools)
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<CallToolResult> {
        self.logger.info(&format!("[McpClient] Calling tool: {}", name));

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: arguments.as_object().cloned(),
            task: None,
        };

        self.client
            .call_tool(params)
            .await
            .map_err(|e| McpError::ToolCallFailed(e.to_string()))
    }

    /// Get server info
    pub fn server_info(&self) -> Option<&Implementation> {
        self.client.peer_info().map(|info| &info.server_info)
    }

    /// Close the connection
    pub async fn close(self) -> McpResult<()> {
        self.logger.info("[McpClient] Closing connection");
        self.client
            .cancel()
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;
        Ok(())
    }
}

impl From<Tool> for ToolDescriptor {
    fn from(tool: Tool) -> Self {
        Self {
            name: tool.name.to_string(),
            description: tool.description.map(|s| s.to_string()),
            // input_schema is Arc<JsonObject>; an empty object means "no schema given"
            input_schema: if tool.input_schema.is_empty() {
                None
            } else {
                serde_json::to_value(tool.input_schema.as_ref()).ok()
            },
        }
    }
}

/// Convert an MCP tool result into the JSON value handed to the model
///
/// Structured content wins when the server sends it. Otherwise the text
/// parts are joined with newlines. A result flagged `is_error` is a failure.
pub fn tool_result_to_value(result: CallToolResult) -> McpResult<Value> {
    let text = result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    if result.is_error.unwrap_or(false) {
        let message = if text.is_empty() { "tool reported an error".to_string() } else { text };
        return Err(McpError::ToolCallFailed(message));
    }

    if let Some(structured) = result.structured_content {
        return Ok(structured);
    }

    Ok(Value::String(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::Content;

    #[test]
    fn test_initialize_error_mapping() {
        let closed = McpError::from(ClientInitializeError::ConnectionClosed("initialize".into()));
        assert!(matches!(closed, McpError::ConnectionFailed(ref m) if m.contains("initialize")));

        let cancelled = McpError::from(ClientInitializeError::Cancelled);
        assert!(matches!(cancelled, McpError::InitializationFailed(_)));
    }

    #[test]
    fn test_text_result_joined() {
        let result = CallToolResult::success(vec![
            Content::text("block 100"),
            Content::text("hash 0xabc"),
        ]);
        assert_eq!(
            tool_result_to_value(result).unwrap(),
            Value::String("block 100\nhash 0xabc".to_string())
        );
    }

    #[test]
    fn test_error_result_is_failure() {
        let result = CallToolResult::error(vec![Content::text("unknown chain")]);
        let err = tool_result_to_value(result).unwrap_err();
        assert!(matches!(err, McpError::ToolCallFailed(ref m) if m == "unknown chain"));
    }

    #[test]
    fn test_structured_content_preferred() {
        let mut result = CallToolResult::success(vec![Content::text("{\"number\":100}")]);
        result.structured_content = Some(serde_json::json!({ "number": 100 }));
        assert_eq!(
            tool_result_to_value(result).unwrap(),
            serde_json::json!({ "number": 100 })
        );
    }
}
