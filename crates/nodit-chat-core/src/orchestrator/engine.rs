//! The orchestration loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;

use super::error::{OrchestratorError, OrchestratorResult};
use super::options::OrchestratorOptions;
use crate::completion::{CompletionClient, CompletionRequest};
use crate::logging::Logger;
use crate::tools::{RegistryError, ToolRegistry};
use crate::transcript::Transcript;
use crate::types::{CancellationToken, ChatMessage, ToolCall, ToolOutcome};

/// Final answer shown when the model returns no text
pub const EMPTY_ANSWER: &str = "No response received.";

/// Failure of a single tool call; never ends the turn
#[derive(Error, Debug)]
enum ToolError {
    #[error("Invalid tool arguments: {0}")]
    ArgumentParse(#[from] serde_json::Error),

    #[error(transparent)]
    Execution(#[from] RegistryError),
}

/// Runs user turns against a completion client and a tool registry
pub struct Orchestrator {
    client: Arc<dyn CompletionClient>,
    registry: Arc<ToolRegistry>,
    transcript: Arc<Transcript>,
    options: RwLock<OrchestratorOptions>,
    busy: AtomicBool,
    logger: Arc<dyn Logger>,
}

/// Clears the busy flag when the turn ends, however it ends
struct TurnGuard<'a>(&'a AtomicBool);

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Orchestrator {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        registry: Arc<ToolRegistry>,
        transcript: Arc<Transcript>,
        options: OrchestratorOptions,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            client,
            registry,
            transcript,
            options: RwLock::new(options),
            busy: AtomicBool::new(false),
            logger,
        }
    }

    pub fn transcript(&self) -> &Arc<Transcript> {
        &self.transcript
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub fn options(&self) -> OrchestratorOptions {
        self.options.read().clone()
    }

    /// Replace the options; takes effect on the next turn
    pub fn set_options(&self, options: OrchestratorOptions) {
        *self.options.write() = options;
    }

    /// Whether a turn is in flight
    pub fn is_loading(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Run one user turn to completion
    pub async fn run(&self, text: &str) -> OrchestratorResult<String> {
        self.run_with_cancel(text, &CancellationToken::new()).await
    }

    /// Run one user turn, stopping early once `cancel` fires
    ///
    /// Rejections (missing key, busy, registry not ready) append nothing.
    /// Every other failure appends exactly one assistant error entry.
    pub async fn run_with_cancel(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> OrchestratorResult<String> {
        let options = self.options();
        let api_key = options
            .api_key()
            .ok_or(OrchestratorError::MissingApiKey)?
            .to_string();

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            self.logger.warn("[Orchestrator] Rejected turn: busy");
            return Err(OrchestratorError::Busy);
        }
        let _guard = TurnGuard(&self.busy);

        if options.require_tools && !self.registry.is_ready() {
            return Err(OrchestratorError::RegistryNotReady(self.registry.state()));
        }

        self.transcript.push_user(text);

        match self.drive(text, &options, &api_key, cancel).await {
            Ok(answer) => {
                self.transcript.push_assistant(answer.clone());
                Ok(answer)
            }
            Err(e) => {
                self.logger.error(&format!("[Orchestrator] Turn failed: {}", e));
                self.transcript.push_error(format!("Error: {}", e));
                Err(e)
            }
        }
    }

    async fn drive(
        &self,
        text: &str,
        options: &OrchestratorOptions,
        api_key: &str,
        cancel: &CancellationToken,
    ) -> OrchestratorResult<String> {
        let mut history = vec![ChatMessage::user(text)];
        let mut cycles: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(OrchestratorError::Cancelled);
            }

            // Readiness is read per request so a registry that comes up mid-turn is used
            let tools = if self.registry.is_ready() {
                self.registry.function_tools()
            } else {
                Vec::new()
            };
            self.logger.debug(&format!(
                "[Orchestrator] Request #{} ({} messages, {} tools)",
                cycles + 1,
                history.len(),
                tools.len()
            ));

            let request = CompletionRequest::new(&options.model, history.clone()).with_tools(tools);
            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(OrchestratorError::Cancelled),
                response = self.client.complete(&request, api_key) => response?,
            };
            let message = response
                .first_message()
                .cloned()
                .ok_or_else(|| OrchestratorError::InvalidResponse("no choices".to_string()))?;

            if message.tool_calls.is_empty() {
                let answer = message
                    .content
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| EMPTY_ANSWER.to_string());
                self.logger.info(&format!(
                    "[Orchestrator] Turn finished after {} tool cycles",
                    cycles
                ));
                return Ok(answer);
            }

            if cycles >= options.max_tool_cycles {
                return Err(OrchestratorError::ToolCallLimitExceeded {
                    limit: options.max_tool_cycles,
                });
            }
            cycles += 1;

            let mut outcomes = Vec::with_capacity(message.tool_calls.len());
            for call in &message.tool_calls {
                if cancel.is_cancelled() {
                    return Err(OrchestratorError::Cancelled);
                }
                let outcome = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(OrchestratorError::Cancelled),
                    outcome = self.execute(call) => outcome,
                };
                outcomes.push(outcome);
            }

            history.push(ChatMessage::assistant_tool_calls(
                message.content.clone(),
                message.tool_calls.clone(),
            ));
            history.extend(outcomes.iter().map(ToolOutcome::to_message));
        }
    }

    /// Run one tool call and record it in the transcript
    async fn execute(&self, call: &ToolCall) -> ToolOutcome {
        let name = call.name();
        self.transcript.push_tool_notice(name);

        match self.invoke(call).await {
            Ok(result) => {
                let content = match &result {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                self.transcript.push_tool_result(name, content.clone(), result);
                ToolOutcome::success(&call.id, name, content)
            }
            Err(e) => {
                self.logger.warn(&format!("[Orchestrator] Tool {} failed: {}", name, e));
                self.transcript
                    .push_tool_error(name, format!("Error executing {}: {}", name, e));
                ToolOutcome::error(&call.id, name, format!("Error: {}", e))
            }
        }
    }

    async fn invoke(&self, call: &ToolCall) -> Result<Value, ToolError> {
        let arguments = call.parse_arguments()?;
        Ok(self.registry.call_tool(call.name(), arguments).await?)
    }
}
