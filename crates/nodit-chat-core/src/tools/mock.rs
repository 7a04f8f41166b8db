//! In-process tool backend for testing
//!
//! Serves a fixed tool list and canned results without a network
//! connection, and records each call it receives.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::mcp::{McpConnector, McpError, McpResult, ToolBackend};
use crate::types::ToolDescriptor;

/// Mock tool backend with scripted results
#[derive(Default)]
pub struct MockToolBackend {
    tools: Vec<ToolDescriptor>,
    results: HashMap<String, Result<Value, String>>,
    list_error: Option<String>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockToolBackend {
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self {
            tools,
            ..Self::default()
        }
    }

    /// Tool `name` returns `value`
    pub fn with_result(mut self, name: impl Into<String>, value: Value) -> Self {
        self.results.insert(name.into(), Ok(value));
        self
    }

    /// Tool `name` fails with `message`
    pub fn with_failure(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.results.insert(name.into(), Err(message.into()));
        self
    }

    /// Tool discovery fails with `message`
    pub fn failing_list(mut self, message: impl Into<String>) -> Self {
        self.list_error = Some(message.into());
        self
    }

    /// Every call received so far: (tool name, arguments)
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ToolBackend for MockToolBackend {
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        match &self.list_error {
            Some(message) => Err(McpError::Protocol(message.clone())),
            None => Ok(self.tools.clone()),
        }
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<Value> {
        self.calls.lock().push((name.to_string(), arguments));

        match self.results.get(name) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(McpError::ToolCallFailed(message.clone())),
            None => Ok(Value::String(format!("{} ok", name))),
        }
    }
}

/// Connector that hands out an existing backend
pub struct StaticConnector {
    backend: Arc<dyn ToolBackend>,
    failures_left: AtomicUsize,
}

impl StaticConnector {
    pub fn new(backend: Arc<dyn ToolBackend>) -> Self {
        Self {
            backend,
            failures_left: AtomicUsize::new(0),
        }
    }

    /// Refuse the first `n` connection attempts
    pub fn failing_times(self, n: usize) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl McpConnector for StaticConnector {
    fn endpoint(&self) -> &str {
        "memory://static"
    }

    async fn connect(&self) -> McpResult<Arc<dyn ToolBackend>> {
        let refused = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if refused {
            return Err(McpError::ConnectionFailed("connection refused".to_string()));
        }
        Ok(Arc::clone(&self.backend))
    }
}
