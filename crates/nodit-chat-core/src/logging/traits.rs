//! Logger trait definition

/// Logger handed to every component as `Arc<dyn Logger>`
///
/// Messages carry their component as a bracketed prefix, e.g.
/// `[ToolRegistry] Connecting to https://...`.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);

    fn info(&self, message: &str);

    fn warn(&self, message: &str);

    fn error(&self, message: &str);
}
