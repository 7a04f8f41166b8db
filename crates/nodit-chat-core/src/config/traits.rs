//! Configuration store trait

use async_trait::async_trait;

use super::settings::ChatSettings;

/// Key-value settings store with explicit load and save
///
/// Implementations:
/// - `MemoryConfigStore`: In-memory
/// - `FileConfigStore`: YAML file (~/.config/nodit-chat/config.yaml)
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the stored settings; a store with nothing saved yields defaults
    async fn load(&self) -> ConfigResult<ChatSettings>;

    /// Persist `settings`, replacing what was stored
    async fn save(&self, settings: &ChatSettings) -> ConfigResult<()>;
}

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Other(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
