//! Tool registry for managing the MCP connection and discovered tools
//!
//! The ToolRegistry is the central component for:
//! - Driving the connection state machine
//! - Caching the tools discovered from the MCP server
//! - Converting tools to the function-calling format
//! - Executing tool calls

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;

use super::catalog::{ToolCategory, ToolFilter, ToolInfo};
use super::state::{ConnectionState, InvalidTransition};
use crate::logging::Logger;
use crate::mcp::{McpConnector, McpError, ToolBackend};
use crate::types::FunctionTool;

/// Tool registry errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Tool registry is not ready (state: {0})")]
    NotReady(ConnectionState),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool is disabled: {0}")]
    ToolDisabled(String),

    #[error("No MCP connector configured")]
    NoConnector,

    #[error(transparent)]
    Transition(#[from] InvalidTransition),

    #[error(transparent)]
    Mcp(#[from] McpError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry of tools available to the orchestrator
pub struct ToolRegistry {
    connector: Option<Arc<dyn McpConnector>>,
    backend: RwLock<Option<Arc<dyn ToolBackend>>>,
    state: watch::Sender<ConnectionState>,
    /// Cached tools from last discovery
    tools: RwLock<Vec<ToolInfo>>,
    /// User-configured enabled/disabled state, survives refreshes
    tool_states: RwLock<HashMap<String, bool>>,
    logger: Arc<dyn Logger>,
}

impl ToolRegistry {
    /// Registry with no connector; stays disconnected and offers no tools
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::build(None, logger)
    }

    /// Registry that connects through `connector`
    pub fn with_connector(connector: Arc<dyn McpConnector>, logger: Arc<dyn Logger>) -> Self {
        Self::build(Some(connector), logger)
    }

    fn build(connector: Option<Arc<dyn McpConnector>>, logger: Arc<dyn Logger>) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            connector,
            backend: RwLock::new(None),
            state,
            tools: RwLock::new(Vec::new()),
            tool_states: RwLock::new(HashMap::new()),
            logger,
        }
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_ready()
    }

    /// Watch connection state changes
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    fn set_state(&self, next: ConnectionState) -> RegistryResult<()> {
        let current = self.state();
        let next = current.transition(next)?;
        self.logger.debug(&format!("[ToolRegistry] State: {} -> {}", current, next));
        self.state.send_replace(next);
        Ok(())
    }

    /// Connect to the MCP server and discover its tools
    ///
    /// Ends in `Ready` on success and `Failed` otherwise. A connection
    /// failure is also returned as an error so callers can report it.
    pub async fn connect(&self) -> RegistryResult<usize> {
        let connector = self.connector.clone().ok_or(RegistryError::NoConnector)?;

        self.set_state(ConnectionState::Connecting)?;
        self.logger.info(&format!(
            "[ToolRegistry] Connecting to {}",
            connector.endpoint()
        ));

        let backend = match connector.connect().await {
            Ok(backend) => backend,
            Err(e) => {
                self.logger.error(&format!("[ToolRegistry] Connection failed: {}", e));
                *self.backend.write() = None;
                self.set_state(ConnectionState::Failed(e.to_string()))?;
                return Err(e.into());
            }
        };
        *self.backend.write() = Some(backend);

        self.discover().await
    }

    /// Reconnect after a failure (or to pick up a restarted server)
    pub async fn retry(&self) -> RegistryResult<usize> {
        self.logger.info("[ToolRegistry] Retrying connection");
        self.connect().await
    }

    /// Re-list tools on the existing connection
    pub async fn refresh(&self) -> RegistryResult<usize> {
        if !self.is_ready() {
            return Err(RegistryError::NotReady(self.state()));
        }
        self.discover().await
    }

    /// Drop the backend and forget discovered tools
    pub fn disconnect(&self) {
        *self.backend.write() = None;
        self.tools.write().clear();
        self.state.send_replace(ConnectionState::Disconnected);
        self.logger.info("[ToolRegistry] Disconnected");
    }

    async fn discover(&self) -> RegistryResult<usize> {
        self.set_state(ConnectionState::Discovering)?;

        let backend = self.backend.read().clone();
        let Some(backend) = backend else {
            self.set_state(ConnectionState::Failed("no backend".to_string()))?;
            return Err(RegistryError::NoConnector);
        };

        match backend.list_tools().await {
            Ok(descriptors) => {
                self.logger.info(&format!(
                    "[ToolRegistry] Discovered {} tools from MCP server",
                    descriptors.len()
                ));

                let states = self.tool_states.read();
                let tools: Vec<ToolInfo> = descriptors
                    .into_iter()
                    .map(|d| {
                        let mut info = ToolInfo::from(d);
                        if let Some(&enabled) = states.get(info.name()) {
                            info.enabled = enabled;
                        }
                        info
                    })
                    .collect();
                drop(states);

                let count = tools.len();
                *self.tools.write() = tools;
                self.set_state(ConnectionState::Ready)?;
                Ok(count)
            }
            Err(e) => {
                self.logger.error(&format!("[ToolRegistry] Failed to fetch tools: {}", e));
                self.set_state(ConnectionState::Failed(e.to_string()))?;
                Err(e.into())
            }
        }
    }

    /// Tools matching a filter
    pub fn tools(&self, filter: &ToolFilter) -> Vec<ToolInfo> {
        self.tools
            .read()
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    /// Function-calling schema for every enabled tool
    pub fn function_tools(&self) -> Vec<FunctionTool> {
        self.tools(&ToolFilter::new())
            .iter()
            .map(|t| t.descriptor.to_function_tool())
            .collect()
    }

    /// Categories present in the catalog, "all" first
    ///
    /// Before any tools are discovered the full category list is returned.
    pub fn categories(&self) -> Vec<String> {
        // First-appearance order, as the tools were listed by the server
        let mut present: Vec<ToolCategory> = Vec::new();
        for tool in self.tools.read().iter() {
            if !present.contains(&tool.category) {
                present.push(tool.category);
            }
        }

        let mut categories = vec!["all".to_string()];
        if present.is_empty() {
            categories.extend(
                ToolCategory::ALL
                    .iter()
                    .filter(|c| **c != ToolCategory::GeneralTools)
                    .map(|c| c.label().to_string()),
            );
        } else {
            categories.extend(present.into_iter().map(|c| c.label().to_string()));
        }
        categories
    }

    /// Enable or disable a tool; remembered across refreshes
    pub fn set_tool_enabled(&self, name: &str, enabled: bool) {
        self.tool_states.write().insert(name.to_string(), enabled);

        let mut tools = self.tools.write();
        if let Some(tool) = tools.iter_mut().find(|t| t.name() == name) {
            tool.enabled = enabled;
        }
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, arguments: Value) -> RegistryResult<Value> {
        if !self.is_ready() {
            return Err(RegistryError::NotReady(self.state()));
        }

        match self.tools.read().iter().find(|t| t.name() == name) {
            None => return Err(RegistryError::UnknownTool(name.to_string())),
            Some(tool) if !tool.enabled => return Err(RegistryError::ToolDisabled(name.to_string())),
            Some(_) => {}
        }

        let backend = self.backend.read().clone();
        let backend = backend.ok_or_else(|| RegistryError::NotReady(self.state()))?;

        self.logger.info(&format!("[ToolRegistry] Calling tool: {}", name));
        Ok(backend.call_tool(name, arguments).await?)
    }

    /// Get count of discovered tools
    pub fn tool_count(&self) -> usize {
        self.tools.read().len()
    }

    /// Get count of tools offered to the model
    pub fn enabled_tool_count(&self) -> usize {
        self.tools(&ToolFilter::new()).len()
    }
}
