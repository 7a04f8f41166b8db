//! In-memory logger that keeps every line it receives

use parking_lot::Mutex;

use super::traits::Logger;

/// A single recorded log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: &'static str,
    pub message: String,
}

/// Logger that records lines in memory
///
/// Used by tests to assert on what a component reported.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<LogLine>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded lines, oldest first
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().clone()
    }

    /// Whether any line at `level` contains `needle`
    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.lines
            .lock()
            .iter()
            .any(|l| l.level == level && l.message.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    fn record(&self, level: &'static str, message: &str) {
        self.lines.lock().push(LogLine {
            level,
            message: message.to_string(),
        });
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.record("debug", message);
    }

    fn info(&self, message: &str) {
        self.record("info", message);
    }

    fn warn(&self, message: &str) {
        self.record("warn", message);
    }

    fn error(&self, message: &str) {
        self.record("error", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_records_levels() {
        let logger = MemoryLogger::new();
        logger.info("connected");
        logger.error(&format!("failed after {} tries", 3));

        let lines = logger.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].level, "info");
        assert!(logger.contains("error", "after 3 tries"));
        assert!(!logger.contains("warn", "connected"));

        logger.clear();
        assert!(logger.lines().is_empty());
    }
}
