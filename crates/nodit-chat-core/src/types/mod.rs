//! Core types shared by the completion client, tool registry and orchestrator

mod message;
mod tool;
mod cancellation;

pub use message::{ChatMessage, MessageRole};
pub use tool::{
    FunctionCall, FunctionSchema, FunctionTool, ToolCall, ToolDescriptor, ToolOutcome,
    DEFAULT_TOOL_DESCRIPTION,
};
pub use cancellation::CancellationToken;
