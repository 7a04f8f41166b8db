//! Environment variable secret store

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// Environment variables consulted for each secret key, in order
static ENV_VAR_MAP: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("openrouter", vec!["NODIT_CHAT_API_KEY", "OPENROUTER_API_KEY"]);
    m
});

/// Read-only secret store over environment variables
///
/// `get("openrouter")` checks `NODIT_CHAT_API_KEY`, then
/// `OPENROUTER_API_KEY`. Unmapped keys are tried verbatim and then as
/// `<KEY>_API_KEY`. Empty values count as unset.
#[derive(Debug, Default)]
pub struct EnvSecretStore {
    _private: (),
}

impl EnvSecretStore {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Variables consulted for `key`
    pub fn env_vars_for(key: &str) -> Vec<String> {
        let lower = key.to_lowercase();
        match ENV_VAR_MAP.get(lower.as_str()) {
            Some(vars) => vars.iter().map(|v| v.to_string()).collect(),
            None => vec![key.to_string(), format!("{}_API_KEY", key.to_uppercase())],
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        Self::env_vars_for(key).iter().find_map(|var| non_empty_var(var))
    }

    fn store(&self, _key: &str, _value: &str) -> SecretStoreResult<()> {
        Err(SecretStoreError::ReadOnly)
    }

    fn delete(&self, _key: &str) -> SecretStoreResult<()> {
        Err(SecretStoreError::ReadOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_mapping() {
        assert_eq!(
            EnvSecretStore::env_vars_for("OpenRouter"),
            vec!["NODIT_CHAT_API_KEY", "OPENROUTER_API_KEY"]
        );
        assert_eq!(
            EnvSecretStore::env_vars_for("nodit"),
            vec!["nodit", "NODIT_API_KEY"]
        );
    }

    #[test]
    fn test_reads_unmapped_variable() {
        env::set_var("NODIT_CHAT_TEST_SECRET_API_KEY", "from-env");
        let store = EnvSecretStore::new();
        assert_eq!(
            store.get("nodit_chat_test_secret"),
            Some("from-env".to_string())
        );
        assert_eq!(store.get_info("nodit_chat_test_secret").source, "env");
        env::remove_var("NODIT_CHAT_TEST_SECRET_API_KEY");
    }

    #[test]
    fn test_empty_value_is_unset() {
        env::set_var("NODIT_CHAT_EMPTY_TEST_API_KEY", "  ");
        let store = EnvSecretStore::new();
        assert!(store.get("nodit_chat_empty_test").is_none());
        env::remove_var("NODIT_CHAT_EMPTY_TEST_API_KEY");
    }

    #[test]
    fn test_read_only() {
        let store = EnvSecretStore::new();
        assert!(matches!(store.store("openrouter", "x"), Err(SecretStoreError::ReadOnly)));
        assert!(matches!(store.delete("openrouter"), Err(SecretStoreError::ReadOnly)));
    }
}
