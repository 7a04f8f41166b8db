//! Completion client trait and wire types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ProviderResult;
use crate::types::{ChatMessage, FunctionTool, ToolCall};

/// Body of a `/chat/completions` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<FunctionTool>>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: None,
        }
    }

    /// Attach tools; an empty list is dropped rather than sent as `[]`
    pub fn with_tools(mut self, tools: Vec<FunctionTool>) -> Self {
        self.tools = if tools.is_empty() { None } else { Some(tools) };
        self
    }
}

/// Parsed `/chat/completions` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// The model's message in `choices[0]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tool_calls: Vec<ToolCall>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ToolCall>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<ToolCall>>::deserialize(deserializer)?.unwrap_or_default())
}

impl CompletionResponse {
    /// A response carrying plain text
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: AssistantMessage {
                    content: Some(content.into()),
                    tool_calls: Vec::new(),
                },
                finish_reason: Some("stop".to_string()),
            }],
        }
    }

    /// A response requesting tool calls
    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            choices: vec![Choice {
                message: AssistantMessage {
                    content: None,
                    tool_calls: calls,
                },
                finish_reason: Some("tool_calls".to_string()),
            }],
        }
    }

    /// The first choice's message
    pub fn first_message(&self) -> Option<&AssistantMessage> {
        self.choices.first().map(|c| &c.message)
    }
}

/// Client for an OpenAI-compatible chat-completion endpoint
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Provider name for logs and errors (e.g., "openrouter")
    fn name(&self) -> &str;

    /// Send one non-streaming completion request
    async fn complete(
        &self,
        request: &CompletionRequest,
        api_key: &str,
    ) -> ProviderResult<CompletionResponse>;
}
