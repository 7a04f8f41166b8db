//! Tool catalog: classification and filtering of discovered tools

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{ToolDescriptor, DEFAULT_TOOL_DESCRIPTION};

/// Display category of a tool, derived from its name and description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ToolCategory {
    BlockchainApis,
    DataServices,
    NodeAccess,
    EventStreaming,
    AptosServices,
    AiIntegration,
    NetworkCoverage,
    GeneralTools,
}

impl ToolCategory {
    /// Every category, in classification order
    pub const ALL: [ToolCategory; 8] = [
        ToolCategory::BlockchainApis,
        ToolCategory::DataServices,
        ToolCategory::NodeAccess,
        ToolCategory::EventStreaming,
        ToolCategory::AptosServices,
        ToolCategory::AiIntegration,
        ToolCategory::NetworkCoverage,
        ToolCategory::GeneralTools,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolCategory::BlockchainApis => "Blockchain APIs",
            ToolCategory::DataServices => "Data Services",
            ToolCategory::NodeAccess => "Node Access",
            ToolCategory::EventStreaming => "Event Streaming",
            ToolCategory::AptosServices => "Aptos Services",
            ToolCategory::AiIntegration => "AI Integration",
            ToolCategory::NetworkCoverage => "Network Coverage",
            ToolCategory::GeneralTools => "General Tools",
        }
    }

    /// Parse a label, case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl std::fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a tool. First matching rule wins.
///
/// The AI rule looks for "ai" anywhere in the description, so descriptions
/// mentioning e.g. "chain" land there when no earlier rule matched.
pub fn category_for(name: &str, description: Option<&str>) -> ToolCategory {
    let name = name.to_lowercase();
    let desc = description.unwrap_or_default().to_lowercase();

    if name.contains("blockchain") || name.contains("context") {
        ToolCategory::BlockchainApis
    } else if name.contains("data") {
        ToolCategory::DataServices
    } else if name.contains("node") || name.contains("rpc") {
        ToolCategory::NodeAccess
    } else if name.contains("webhook") || name.contains("event") {
        ToolCategory::EventStreaming
    } else if name.contains("aptos") {
        ToolCategory::AptosServices
    } else if name.contains("mcp") || desc.contains("ai") || desc.contains("model") {
        ToolCategory::AiIntegration
    } else if name.contains("chain") || name.contains("network") {
        ToolCategory::NetworkCoverage
    } else {
        ToolCategory::GeneralTools
    }
}

/// Parameter names a tool accepts (keys of `inputSchema.properties`)
pub fn capabilities_of(schema: Option<&Value>) -> Vec<String> {
    schema
        .and_then(|s| s.get("properties"))
        .and_then(Value::as_object)
        .map(|props| props.keys().cloned().collect())
        .unwrap_or_default()
}

/// A discovered tool with its catalog metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub descriptor: ToolDescriptor,
    pub category: ToolCategory,
    pub capabilities: Vec<String>,
    /// Disabled tools stay listed but are not offered to the model
    pub enabled: bool,
}

impl ToolInfo {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Description for display, with the placeholder when absent
    pub fn description(&self) -> &str {
        self.descriptor
            .description
            .as_deref()
            .unwrap_or(DEFAULT_TOOL_DESCRIPTION)
    }
}

impl From<ToolDescriptor> for ToolInfo {
    fn from(descriptor: ToolDescriptor) -> Self {
        let category = category_for(&descriptor.name, descriptor.description.as_deref());
        let capabilities = capabilities_of(descriptor.input_schema.as_ref());
        Self {
            descriptor,
            category,
            capabilities,
            enabled: true,
        }
    }
}

/// Selects tools from the catalog
#[derive(Debug, Clone, Default)]
pub struct ToolFilter {
    /// Only this category (None = all)
    pub category: Option<ToolCategory>,
    /// Case-insensitive substring of name or description
    pub search: Option<String>,
    /// Include disabled tools (default: false)
    pub include_disabled: bool,
}

impl ToolFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every tool, enabled or not
    pub fn all() -> Self {
        Self {
            include_disabled: true,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: ToolCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() { None } else { Some(term) };
        self
    }

    pub fn with_disabled(mut self) -> Self {
        self.include_disabled = true;
        self
    }

    pub fn matches(&self, tool: &ToolInfo) -> bool {
        if !self.include_disabled && !tool.enabled {
            return false;
        }

        if let Some(category) = self.category {
            if tool.category != category {
                return false;
            }
        }

        if let Some(ref term) = self.search {
            let term = term.to_lowercase();
            if !tool.name().to_lowercase().contains(&term)
                && !tool.description().to_lowercase().contains(&term)
            {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(name: &str, description: &str) -> ToolInfo {
        ToolDescriptor::new(name).with_description(description).into()
    }

    #[test]
    fn test_category_rules_in_order() {
        assert_eq!(category_for("get_blockchain_data", None), ToolCategory::BlockchainApis);
        assert_eq!(category_for("list_nodit_api_context", None), ToolCategory::BlockchainApis);
        assert_eq!(category_for("get_token_data", None), ToolCategory::DataServices);
        assert_eq!(category_for("call_node_rpc", None), ToolCategory::NodeAccess);
        assert_eq!(category_for("create_webhook", None), ToolCategory::EventStreaming);
        assert_eq!(category_for("aptos_indexer_query", None), ToolCategory::AptosServices);
        assert_eq!(category_for("mcp_status", None), ToolCategory::AiIntegration);
        assert_eq!(category_for("list_networks", Some("Lists networks")), ToolCategory::NetworkCoverage);
        assert_eq!(category_for("get_block", Some("Fetch a block")), ToolCategory::GeneralTools);
    }

    #[test]
    fn test_description_substring_quirk() {
        // "chain" contains "ai", so the AI rule fires before the network rule
        assert_eq!(
            category_for("list_chains", Some("Supported chains")),
            ToolCategory::AiIntegration
        );
        assert_eq!(category_for("list_chains", None), ToolCategory::NetworkCoverage);
    }

    #[test]
    fn test_capabilities_from_schema() {
        let schema = json!({
            "type": "object",
            "properties": { "chain": {}, "number": {} }
        });
        let mut caps = capabilities_of(Some(&schema));
        caps.sort();
        assert_eq!(caps, vec!["chain", "number"]);
        assert!(capabilities_of(None).is_empty());
        assert!(capabilities_of(Some(&json!({"type": "object"}))).is_empty());
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in ToolCategory::ALL {
            assert_eq!(ToolCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(ToolCategory::from_label("node access"), Some(ToolCategory::NodeAccess));
        assert_eq!(ToolCategory::from_label("all"), None);
    }

    #[test]
    fn test_filter_search_and_category() {
        let block = info("get_block", "Fetch a block by number");
        let rpc = info("call_node_rpc", "Raw JSON-RPC passthrough");

        let search = ToolFilter::new().with_search("BLOCK");
        assert!(search.matches(&block));
        assert!(!search.matches(&rpc));

        let by_desc = ToolFilter::new().with_search("passthrough");
        assert!(by_desc.matches(&rpc));

        let node = ToolFilter::new().with_category(ToolCategory::NodeAccess);
        assert!(node.matches(&rpc));
        assert!(!node.matches(&block));

        assert!(ToolFilter::new().with_search("   ").search.is_none());
    }

    #[test]
    fn test_filter_disabled() {
        let mut tool = info("get_block", "Fetch a block");
        tool.enabled = false;
        assert!(!ToolFilter::new().matches(&tool));
        assert!(ToolFilter::all().matches(&tool));
        assert!(ToolFilter::new().with_disabled().matches(&tool));
    }

    #[test]
    fn test_description_placeholder() {
        let tool: ToolInfo = ToolDescriptor::new("get_block").into();
        assert_eq!(tool.description(), DEFAULT_TOOL_DESCRIPTION);
        assert!(tool.enabled);
    }
}
