//! In-memory configuration store

use async_trait::async_trait;
use parking_lot::RwLock;

use super::settings::ChatSettings;
use super::traits::{ConfigResult, ConfigStore};

/// In-memory store; starts from defaults unless seeded
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    settings: RwLock<Option<ChatSettings>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ChatSettings) -> Self {
        Self {
            settings: RwLock::new(Some(settings)),
        }
    }

    /// Whether anything has been saved
    pub fn is_saved(&self) -> bool {
        self.settings.read().is_some()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn load(&self) -> ConfigResult<ChatSettings> {
        Ok(self.settings.read().clone().unwrap_or_default())
    }

    async fn save(&self, settings: &ChatSettings) -> ConfigResult<()> {
        *self.settings.write() = Some(settings.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_load_save() {
        let store = MemoryConfigStore::new();
        assert!(!store.is_saved());
        assert_eq!(store.load().await.unwrap(), ChatSettings::default());

        let settings = ChatSettings::default().with_model("openai/gpt-4o");
        store.save(&settings).await.unwrap();

        assert!(store.is_saved());
        assert_eq!(store.load().await.unwrap().model, "openai/gpt-4o");
    }
}
