//! Per-orchestrator settings

use crate::config::{ChatSettings, DEFAULT_MAX_TOOL_CYCLES, DEFAULT_MODEL};

/// Model, credential and loop limits for an [`Orchestrator`](super::Orchestrator)
#[derive(Clone, PartialEq, Eq)]
pub struct OrchestratorOptions {
    pub model: String,
    pub api_key: Option<String>,
    pub max_tool_cycles: u32,
    pub require_tools: bool,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            max_tool_cycles: DEFAULT_MAX_TOOL_CYCLES,
            require_tools: false,
        }
    }
}

impl OrchestratorOptions {
    pub fn from_settings(settings: &ChatSettings) -> Self {
        Self {
            model: settings.model.clone(),
            api_key: None,
            max_tool_cycles: settings.max_tool_cycles,
            require_tools: settings.require_tools,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_max_tool_cycles(mut self, cycles: u32) -> Self {
        self.max_tool_cycles = cycles;
        self
    }

    pub fn with_require_tools(mut self, require: bool) -> Self {
        self.require_tools = require;
        self
    }

    /// The credential, if present and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

impl std::fmt::Debug for OrchestratorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrchestratorOptions")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tool_cycles", &self.max_tool_cycles)
            .field("require_tools", &self.require_tools)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        let settings = ChatSettings::default()
            .with_model("anthropic/claude-3.5-sonnet")
            .with_max_tool_cycles(4)
            .requiring_tools();
        let options = OrchestratorOptions::from_settings(&settings);
        assert_eq!(options.model, "anthropic/claude-3.5-sonnet");
        assert_eq!(options.max_tool_cycles, 4);
        assert!(options.require_tools);
        assert!(options.api_key().is_none());
    }

    #[test]
    fn test_blank_key_is_missing() {
        assert!(OrchestratorOptions::default().with_api_key("  ").api_key().is_none());
        let options = OrchestratorOptions::default().with_api_key("sk-or-1");
        assert_eq!(options.api_key(), Some("sk-or-1"));
        assert!(!format!("{:?}", options).contains("sk-or-1"));
    }
}
