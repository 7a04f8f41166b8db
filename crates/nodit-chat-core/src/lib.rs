//! Nodit Chat Core
//!
//! A chat assistant wired to a remote MCP tool server and an
//! OpenRouter-compatible chat-completion API. Front ends (the CLI, or
//! anything else) drive it through the [`Orchestrator`].
//!
//! ## Tool-call orchestration
//!
//! Each user turn alternates between the completion endpoint and the
//! tools discovered on the MCP server until the model answers in text:
//!
//! ```rust,ignore
//! use nodit_chat_core::{
//!     HttpConnector, OpenRouterClient, Orchestrator, OrchestratorOptions, ToolRegistry, Transcript,
//! };
//!
//! let registry = Arc::new(ToolRegistry::with_connector(
//!     Arc::new(HttpConnector::new(&settings.mcp_url, logger.clone())),
//!     logger.clone(),
//! ));
//! registry.connect().await?;
//!
//! let orchestrator = Orchestrator::new(
//!     Arc::new(OpenRouterClient::new(logger.clone())),
//!     registry,
//!     Arc::new(Transcript::with_greeting()),
//!     OrchestratorOptions::from_settings(&settings).with_api_key(key),
//!     logger,
//! );
//! let answer = orchestrator.run("what is block 100 on ethereum?").await?;
//! ```

pub mod types;
pub mod logging;
pub mod completion;
pub mod mcp;
pub mod tools;
pub mod transcript;
pub mod config;
pub mod secrets;
pub mod orchestrator;

// Re-export commonly used types
pub use types::{
    ChatMessage, MessageRole,
    ToolCall, ToolDescriptor, FunctionTool,
    CancellationToken,
};

pub use logging::{Logger, NoOpLogger, MemoryLogger, TracingLogger};

pub use completion::{
    CompletionClient, CompletionRequest, CompletionResponse,
    OpenRouterClient, ProviderError, ProviderResult,
};

pub use mcp::{McpClient, McpConnector, McpError, HttpConnector, ToolBackend};

pub use tools::{ConnectionState, ToolCategory, ToolFilter, ToolInfo, ToolRegistry, RegistryError};

pub use transcript::{Message, Sender, Transcript, GREETING};

pub use config::{ChatSettings, ConfigStore, ConfigError, FileConfigStore, MemoryConfigStore};

pub use secrets::{
    SecretStore, SecretInfo, SecretStoreError,
    EnvSecretStore, KeychainSecretStore, MemorySecretStore, ChainSecretStore,
    API_KEY_SECRET,
};

pub use orchestrator::{Orchestrator, OrchestratorError, OrchestratorOptions, OrchestratorResult};
