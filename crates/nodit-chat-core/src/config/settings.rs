//! Chat settings

use serde::{Deserialize, Serialize};

use crate::completion::DEFAULT_API_BASE;

pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_MCP_URL: &str = "https://nodit-mcp.uratmangun.fun/mcp";
pub const DEFAULT_MAX_TOOL_CYCLES: u32 = 10;

/// Persisted chat settings
///
/// Every field has a default so partial files load cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Model identifier as used by the completion API
    pub model: String,
    /// OpenAI-compatible API base URL
    pub api_base: String,
    /// Streamable HTTP endpoint of the MCP server
    pub mcp_url: String,
    /// Upper bound on tool-call cycles per turn
    pub max_tool_cycles: u32,
    /// Refuse to send while the tool registry is not ready
    pub require_tools: bool,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            mcp_url: DEFAULT_MCP_URL.to_string(),
            max_tool_cycles: DEFAULT_MAX_TOOL_CYCLES,
            require_tools: false,
        }
    }
}

impl ChatSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_mcp_url(mut self, url: impl Into<String>) -> Self {
        self.mcp_url = url.into();
        self
    }

    pub fn with_max_tool_cycles(mut self, cycles: u32) -> Self {
        self.max_tool_cycles = cycles;
        self
    }

    pub fn requiring_tools(mut self) -> Self {
        self.require_tools = true;
        self
    }
}
