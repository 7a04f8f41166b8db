//! Logging abstractions for runtime-agnostic logging

mod traits;
mod noop;
mod memory;
mod tracing_logger;

pub use traits::Logger;
pub use noop::NoOpLogger;
pub use memory::{MemoryLogger, LogLine};
pub use tracing_logger::TracingLogger;
