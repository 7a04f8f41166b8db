//! Chat-completion endpoint clients
//!
//! The orchestrator talks to a `CompletionClient`. `OpenRouterClient` speaks
//! the OpenAI-compatible `/chat/completions` wire format used by OpenRouter;
//! `MockCompletionClient` replays scripted responses for tests.

mod error;
mod traits;
mod openrouter;
mod mock;

pub use error::{ProviderError, ProviderResult};
pub use traits::{
    AssistantMessage, Choice, CompletionClient, CompletionRequest, CompletionResponse,
};
pub use openrouter::{OpenRouterClient, DEFAULT_API_BASE};
pub use mock::{MockCompletionClient, MockReply};
