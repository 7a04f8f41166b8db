//! Settings storage
//!
//! Settings are loaded on startup and written only on an explicit save:
//! - `MemoryConfigStore`: In-memory, for tests and ephemeral sessions
//! - `FileConfigStore`: YAML file under the user config directory
//!
//! The API credential is not part of the settings; it lives in a
//! `SecretStore` (see the `secrets` module).

mod settings;
mod traits;
mod memory;
mod file;

pub use settings::{ChatSettings, DEFAULT_MAX_TOOL_CYCLES, DEFAULT_MCP_URL, DEFAULT_MODEL};
pub use traits::{ConfigError, ConfigResult, ConfigStore};
pub use memory::MemoryConfigStore;
pub use file::FileConfigStore;
