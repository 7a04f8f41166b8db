//! Logger that forwards into `tracing`
//!
//! Lets front ends install any `tracing` subscriber (the CLI uses
//! `tracing-subscriber` with an env filter) while library code keeps
//! talking to the `Logger` trait.

use super::traits::Logger;

/// Forwards every message to the matching `tracing` macro
#[derive(Debug, Clone)]
pub struct TracingLogger {
    component: &'static str,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::with_component("nodit_chat")
    }

    /// Tag every event with `component`
    pub fn with_component(component: &'static str) -> Self {
        Self { component }
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(component = self.component, "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(component = self.component, "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(component = self.component, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(component = self.component, "{}", message);
    }
}
