//! System keychain secret store
//!
//! macOS Keychain, Windows Credential Manager, or the Secret Service API
//! (GNOME Keyring, KWallet) on Linux.

use std::sync::Arc;

use keyring::Entry;

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};
use crate::logging::{Logger, NoOpLogger};

const DEFAULT_SERVICE: &str = "nodit-chat";

/// Secret store backed by the OS keychain
///
/// Entries are namespaced by service name: service "nodit-chat" and key
/// "openrouter" become the keychain entry `nodit-chat:openrouter`.
pub struct KeychainSecretStore {
    service_name: String,
    logger: Arc<dyn Logger>,
}

impl KeychainSecretStore {
    pub fn new() -> Self {
        Self::with_service(DEFAULT_SERVICE)
    }

    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service_name: service.into(),
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    fn entry(&self, key: &str) -> SecretStoreResult<Entry> {
        Entry::new(&self.service_name, key)
            .map_err(|e| SecretStoreError::Other(format!("Failed to create keychain entry: {}", e)))
    }
}

impl Default for KeychainSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for KeychainSecretStore {
    fn name(&self) -> &str {
        "keychain"
    }

    fn is_available(&self) -> bool {
        match Entry::new(&self.service_name, "__nodit_chat_availability_check__") {
            Ok(_) => true,
            Err(e) => {
                self.logger.warn(&format!("[Keychain] Unavailable: {}", e));
                false
            }
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        let entry = match self.entry(key) {
            Ok(entry) => entry,
            Err(e) => {
                self.logger.error(&format!("[Keychain] {}", e));
                return None;
            }
        };

        match entry.get_password() {
            Ok(password) => Some(password),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                self.logger.warn(&format!("[Keychain] get('{}') failed: {}", key, e));
                None
            }
        }
    }

    fn store(&self, key: &str, value: &str) -> SecretStoreResult<()> {
        self.logger.info(&format!(
            "[Keychain] Storing '{}' under service '{}'",
            key, self.service_name
        ));
        self.entry(key)?
            .set_password(value)
            .map_err(|e| SecretStoreError::Other(format!("Failed to store in keychain: {}", e)))
    }

    fn delete(&self, key: &str) -> SecretStoreResult<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SecretStoreError::Other(format!(
                "Failed to delete from keychain: {}",
                e
            ))),
        }
    }
}
