//! Orchestrator error types

use thiserror::Error;

use crate::completion::ProviderError;
use crate::tools::ConnectionState;

/// Reasons a chat turn fails
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrchestratorError {
    /// No API credential configured; nothing was sent
    #[error("OpenRouter API key is not configured")]
    MissingApiKey,

    /// Another turn is still running
    #[error("A request is already in progress")]
    Busy,

    /// Tools are required but the registry is not ready
    #[error("Tool registry is not ready (state: {0})")]
    RegistryNotReady(ConnectionState),

    /// The completion endpoint could not be reached or returned an error status
    #[error("{}", transport_message(.status, .message))]
    Transport { status: Option<u16>, message: String },

    /// The completion endpoint answered with something unusable
    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),

    /// The model kept requesting tools past the cycle limit
    #[error("Tool call limit exceeded: the model was still requesting tools after {limit} cycles")]
    ToolCallLimitExceeded { limit: u32 },

    #[error("Request cancelled")]
    Cancelled,
}

fn transport_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("HTTP error! status: {} {}", status, message),
        None => format!("Request failed: {}", message),
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

impl From<ProviderError> for OrchestratorError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingApiKey { .. } => Self::MissingApiKey,
            ProviderError::InvalidResponse { message, .. } => Self::InvalidResponse(message),
            ProviderError::ApiError { status, message, .. } => Self::Transport {
                status: Some(status),
                message,
            },
            other => Self::Transport {
                status: None,
                message: other.to_string(),
            },
        }
    }
}

impl OrchestratorError {
    /// HTTP status of a transport failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the failure happened before the user message was recorded
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey | Self::Busy | Self::RegistryNotReady(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_provider_error() {
        let err: OrchestratorError = ProviderError::api_error("openrouter", 429, "rate limited").into();
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.to_string(), "HTTP error! status: 429 rate limited");

        let err: OrchestratorError = ProviderError::Other("connection reset".into()).into();
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("connection reset"));

        let err: OrchestratorError = ProviderError::missing_api_key("openrouter").into();
        assert_eq!(err, OrchestratorError::MissingApiKey);
    }

    #[test]
    fn test_rejections() {
        assert!(OrchestratorError::Busy.is_rejection());
        assert!(OrchestratorError::RegistryNotReady(ConnectionState::Connecting).is_rejection());
        assert!(!OrchestratorError::Cancelled.is_rejection());
        assert!(!OrchestratorError::ToolCallLimitExceeded { limit: 3 }.is_rejection());
    }
}
