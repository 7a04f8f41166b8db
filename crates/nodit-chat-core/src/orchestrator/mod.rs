//! Tool-call orchestration
//!
//! One user turn alternates between the completion endpoint and the tool
//! registry until the model answers without requesting tools:
//!
//! ```text
//!   user text ──► complete ──► tool calls? ──no──► final answer
//!                    ▲              │ yes
//!                    │              ▼
//!                    └──── run each call, fold results into history
//! ```
//!
//! The loop is bounded by `max_tool_cycles`. Each turn starts from a fresh
//! single-entry history.

mod engine;
mod error;
mod options;

pub use engine::{Orchestrator, EMPTY_ANSWER};
pub use error::{OrchestratorError, OrchestratorResult};
pub use options::OrchestratorOptions;
