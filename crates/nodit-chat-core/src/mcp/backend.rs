//! Seams between the tool registry and the MCP transport

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::client::{tool_result_to_value, McpClient, McpResult};
use crate::logging::Logger;
use crate::types::ToolDescriptor;

/// A connected source of tools
#[async_trait]
pub trait ToolBackend: Send + Sync {
    /// Discover the tools the server exposes
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>>;

    /// Invoke a tool; `Err` covers both transport and tool-reported failures
    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<Value>;
}

/// Opens a connection to a tool server
#[async_trait]
pub trait McpConnector: Send + Sync {
    /// Where this connector points (for logs and status output)
    fn endpoint(&self) -> &str;

    async fn connect(&self) -> McpResult<Arc<dyn ToolBackend>>;
}

#[async_trait]
impl ToolBackend for McpClient {
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        let tools = McpClient::list_tools(self).await?;
        Ok(tools.into_iter().map(ToolDescriptor::from).collect())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<Value> {
        let result = McpClient::call_tool(self, name, arguments).await?;
        tool_result_to_value(result)
    }
}

/// Connector for a Streamable HTTP MCP endpoint
pub struct HttpConnector {
    url: String,
    logger: Arc<dyn Logger>,
}

impl HttpConnector {
    pub fn new(url: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            url: url.into(),
            logger,
        }
    }
}

#[async_trait]
impl McpConnector for HttpConnector {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn connect(&self) -> McpResult<Arc<dyn ToolBackend>> {
        let client = McpClient::connect_http(&self.url, Arc::clone(&self.logger)).await?;
        if let Some(info) = client.server_info() {
            self.logger.info(&format!(
                "[McpClient] Server: {} {}",
                info.name, info.version
            ));
        }
        Ok(Arc::new(client))
    }
}
