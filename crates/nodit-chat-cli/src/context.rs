//! Wiring of settings, credentials and the chat engine for one invocation

use std::sync::Arc;

use anyhow::{Context as _, Result};
use nodit_chat_core::{
    ChainSecretStore, ChatSettings, ConfigStore, EnvSecretStore, FileConfigStore, HttpConnector,
    KeychainSecretStore, Logger, OpenRouterClient, Orchestrator, OrchestratorOptions, SecretStore,
    ToolRegistry, TracingLogger, Transcript, API_KEY_SECRET,
};

use crate::cli::Cli;

pub struct AppContext {
    pub store: FileConfigStore,
    /// Saved settings with command-line overrides applied
    pub settings: ChatSettings,
    pub secrets: ChainSecretStore,
    pub logger: Arc<dyn Logger>,
    no_tools: bool,
}

impl AppContext {
    pub async fn load(cli: &Cli) -> Result<Self> {
        let store = match &cli.config {
            Some(path) => FileConfigStore::new(path),
            None => FileConfigStore::user(),
        };
        let mut settings = store
            .load()
            .await
            .with_context(|| format!("failed to read settings from {}", store.path().display()))?;
        if let Some(model) = &cli.model {
            settings.model = model.clone();
        }

        let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new());

        Ok(Self {
            store,
            settings,
            secrets: secret_chain(logger.clone())?,
            logger,
            no_tools: cli.no_tools,
        })
    }

    pub fn api_key(&self) -> Option<String> {
        self.secrets.get(API_KEY_SECRET)
    }

    /// Registry for the configured MCP server, connected unless `--no-tools`
    ///
    /// A failed connection is reported and the session continues without tools.
    pub async fn registry(&self) -> Arc<ToolRegistry> {
        if self.no_tools {
            return Arc::new(ToolRegistry::new(self.logger.clone()));
        }

        let connector = HttpConnector::new(&self.settings.mcp_url, self.logger.clone());
        let registry = Arc::new(ToolRegistry::with_connector(
            Arc::new(connector),
            self.logger.clone(),
        ));
        match registry.connect().await {
            Ok(count) => tracing::info!("Connected to {} ({} tools)", self.settings.mcp_url, count),
            Err(e) => eprintln!(
                "warning: MCP server unavailable ({}), continuing without tools",
                e
            ),
        }
        registry
    }

    pub fn orchestrator(&self, registry: Arc<ToolRegistry>, transcript: Arc<Transcript>) -> Orchestrator {
        let mut options = OrchestratorOptions::from_settings(&self.settings);
        options.api_key = self.api_key();

        Orchestrator::new(
            Arc::new(OpenRouterClient::with_api_base(
                &self.settings.api_base,
                self.logger.clone(),
            )),
            registry,
            transcript,
            options,
            self.logger.clone(),
        )
    }
}

/// Keychain first (where `set-key` writes), then environment variables
fn secret_chain(logger: Arc<dyn Logger>) -> Result<ChainSecretStore> {
    let stores: Vec<Arc<dyn SecretStore>> = vec![
        Arc::new(KeychainSecretStore::new().with_logger(logger)),
        Arc::new(EnvSecretStore::new()),
    ];
    Ok(ChainSecretStore::new(stores)?)
}
