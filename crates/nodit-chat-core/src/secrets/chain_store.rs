//! Chained secret store with fallback behavior

use std::sync::Arc;

use super::traits::{SecretInfo, SecretStore, SecretStoreError, SecretStoreResult};

/// Tries each store in order on reads; writes go to one designated store
///
/// # Example
///
/// ```
/// use nodit_chat_core::secrets::{SecretStore, ChainSecretStore, EnvSecretStore, MemorySecretStore};
/// use std::sync::Arc;
///
/// let memory = Arc::new(MemorySecretStore::new());
/// let env = Arc::new(EnvSecretStore::new());
///
/// let chain = ChainSecretStore::new(vec![memory, env]).unwrap();
/// chain.store("test", "value").unwrap();
/// ```
pub struct ChainSecretStore {
    stores: Vec<Arc<dyn SecretStore>>,
    write_store_index: usize,
}

impl ChainSecretStore {
    /// Chain whose first store takes writes
    pub fn new(stores: Vec<Arc<dyn SecretStore>>) -> SecretStoreResult<Self> {
        Self::with_write_store(stores, 0)
    }

    pub fn with_write_store(
        stores: Vec<Arc<dyn SecretStore>>,
        write_store_index: usize,
    ) -> SecretStoreResult<Self> {
        if stores.is_empty() {
            return Err(SecretStoreError::Other(
                "ChainSecretStore requires at least one store".to_string(),
            ));
        }
        if write_store_index >= stores.len() {
            return Err(SecretStoreError::Other(format!(
                "write store index {} out of bounds ({} stores)",
                write_store_index,
                stores.len()
            )));
        }
        Ok(Self {
            stores,
            write_store_index,
        })
    }

    pub fn stores(&self) -> &[Arc<dyn SecretStore>] {
        &self.stores
    }

    pub fn write_store(&self) -> &Arc<dyn SecretStore> {
        &self.stores[self.write_store_index]
    }

    fn available(&self) -> impl Iterator<Item = &Arc<dyn SecretStore>> {
        self.stores.iter().filter(|s| s.is_available())
    }
}

impl SecretStore for ChainSecretStore {
    fn name(&self) -> &str {
        "chain"
    }

    fn is_available(&self) -> bool {
        self.stores.iter().any(|s| s.is_available())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.available().find_map(|s| s.get(key))
    }

    fn store(&self, key: &str, value: &str) -> SecretStoreResult<()> {
        let store = self.write_store();
        if !store.is_available() {
            return Err(SecretStoreError::NotAvailable(store.name().to_string()));
        }
        store.store(key, value)
    }

    /// Removes the key from every writable store that has it
    fn delete(&self, key: &str) -> SecretStoreResult<()> {
        for store in self.available() {
            if store.has(key) {
                match store.delete(key) {
                    Ok(()) | Err(SecretStoreError::ReadOnly) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(())
    }

    fn get_info(&self, key: &str) -> SecretInfo {
        self.available()
            .find(|s| s.has(key))
            .map(|s| SecretInfo::new(true, s.name()))
            .unwrap_or_else(SecretInfo::not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::{EnvSecretStore, MemorySecretStore};

    #[test]
    fn test_empty_chain_rejected() {
        assert!(ChainSecretStore::new(Vec::new()).is_err());
        let one: Vec<Arc<dyn SecretStore>> = vec![Arc::new(MemorySecretStore::new())];
        assert!(ChainSecretStore::with_write_store(one, 1).is_err());
    }

    #[test]
    fn test_fallback_order() {
        let first = Arc::new(MemorySecretStore::new());
        let second = Arc::new(MemorySecretStore::with_secret("openrouter", "from-second"));
        let chain = ChainSecretStore::new(vec![first.clone(), second]).unwrap();

        assert_eq!(chain.get("openrouter"), Some("from-second".to_string()));

        chain.store("openrouter", "from-first").unwrap();
        assert_eq!(first.get("openrouter"), Some("from-first".to_string()));
        assert_eq!(chain.get("openrouter"), Some("from-first".to_string()));
    }

    #[test]
    fn test_delete_skips_read_only() {
        let memory = Arc::new(MemorySecretStore::with_secret("openrouter", "k"));
        let chain = ChainSecretStore::new(vec![memory.clone(), Arc::new(EnvSecretStore::new())]).unwrap();

        chain.delete("openrouter").unwrap();
        assert!(!memory.has("openrouter"));
    }

    #[test]
    fn test_get_info_reports_source() {
        let chain = ChainSecretStore::new(vec![
            Arc::new(MemorySecretStore::new()),
            Arc::new(MemorySecretStore::with_secret("openrouter", "k")),
        ])
        .unwrap();
        assert_eq!(chain.get_info("openrouter"), SecretInfo::new(true, "memory"));
        assert_eq!(chain.get_info("missing"), SecretInfo::not_found());
    }
}
