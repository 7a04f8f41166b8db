//! File-based configuration store (YAML)

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::settings::ChatSettings;
use super::traits::{ConfigResult, ConfigStore};

/// YAML-backed settings store
///
/// # Example
///
/// ```no_run
/// use nodit_chat_core::config::FileConfigStore;
///
/// // ~/.config/nodit-chat/config.yaml
/// let store = FileConfigStore::user();
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config directory (`~/.config` on Linux)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("nodit-chat").join("config.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Copy the current file next to itself as `config.yaml.backup`
    pub fn backup(&self) -> ConfigResult<Option<PathBuf>> {
        if !self.exists() {
            return Ok(None);
        }

        let backup_path = self.path.with_extension("yaml.backup");
        fs::copy(&self.path, &backup_path)?;
        Ok(Some(backup_path))
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load(&self) -> ConfigResult<ChatSettings> {
        if !self.path.exists() {
            return Ok(ChatSettings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ChatSettings::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    async fn save(&self, settings: &ChatSettings) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(settings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("config.yaml"));
        assert!(!store.exists());
        assert_eq!(store.load().await.unwrap(), ChatSettings::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let store = FileConfigStore::new(&path);

        let settings = ChatSettings::default()
            .with_model("anthropic/claude-3.5-sonnet")
            .with_max_tool_cycles(4);
        store.save(&settings).await.unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("anthropic/claude-3.5-sonnet"));

        let reopened = FileConfigStore::new(&path);
        assert_eq!(reopened.load().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_invalid_yaml_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "model: [unterminated").unwrap();

        let err = FileConfigStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let store = FileConfigStore::new(&path);

        assert!(store.backup().unwrap().is_none());

        fs::write(&path, "model: openai/gpt-4o\n").unwrap();
        let backup_path = store.backup().unwrap().unwrap();
        assert!(backup_path.exists());
        assert!(backup_path.to_string_lossy().ends_with("config.yaml.backup"));
    }
}
