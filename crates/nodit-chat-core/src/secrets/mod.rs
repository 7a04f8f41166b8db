//! Credential storage
//!
//! The completion API key is stored under [`API_KEY_SECRET`]:
//! - `EnvSecretStore`: read-only, from `OPENROUTER_API_KEY` / `NODIT_CHAT_API_KEY`
//! - `KeychainSecretStore`: OS keychain via `keyring`
//! - `MemorySecretStore`: In-memory
//! - `ChainSecretStore`: ordered fallback over several stores

mod traits;
mod env_store;
mod memory_store;
mod keychain_store;
mod chain_store;

pub use traits::{SecretInfo, SecretStore, SecretStoreError, SecretStoreResult};
pub use env_store::EnvSecretStore;
pub use memory_store::MemorySecretStore;
pub use keychain_store::KeychainSecretStore;
pub use chain_store::ChainSecretStore;

/// Secret key holding the completion API credential
pub const API_KEY_SECRET: &str = "openrouter";
