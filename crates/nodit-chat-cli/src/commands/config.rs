//! `config`: show and edit saved settings

use anyhow::{bail, Context as _, Result};
use nodit_chat_core::{ChatSettings, ConfigStore, SecretStore, API_KEY_SECRET};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{Cli, ConfigCommand};
use crate::context::AppContext;

pub async fn run(cli: &Cli, command: ConfigCommand) -> Result<()> {
    let ctx = AppContext::load(cli).await?;

    match command {
        ConfigCommand::Show => {
            println!("file: {}", ctx.store.path().display());
            print!("{}", describe(&ctx.settings));
            let info = ctx.secrets.get_info(API_KEY_SECRET);
            if info.available {
                println!("api_key: set ({})", info.source);
            } else {
                println!("api_key: not set");
            }
            Ok(())
        }
        ConfigCommand::SetKey { key } => {
            let key = match key {
                Some(key) => key,
                None => read_key().await?,
            };
            let key = key.trim();
            if key.is_empty() {
                bail!("API key must not be empty");
            }
            ctx.secrets
                .store(API_KEY_SECRET, key)
                .context("failed to store the API key in the keyring")?;
            println!("API key saved to {}", ctx.secrets.write_store().name());
            Ok(())
        }
        edit => {
            // Re-read so a --model override is not persisted by accident
            let settings = apply(ctx.store.load().await?, edit)?;
            if let Some(backup) = ctx.store.backup()? {
                tracing::debug!("Previous settings saved to {}", backup.display());
            }
            ctx.store.save(&settings).await?;
            println!("Saved {}", ctx.store.path().display());
            Ok(())
        }
    }
}

fn apply(settings: ChatSettings, command: ConfigCommand) -> Result<ChatSettings> {
    Ok(match command {
        ConfigCommand::SetModel { model } => settings.with_model(model),
        ConfigCommand::SetApiBase { url } => settings.with_api_base(require_url(url)?),
        ConfigCommand::SetMcpUrl { url } => settings.with_mcp_url(require_url(url)?),
        ConfigCommand::SetMaxCycles { cycles } => {
            if cycles == 0 {
                bail!("max cycles must be at least 1");
            }
            settings.with_max_tool_cycles(cycles)
        }
        ConfigCommand::Show | ConfigCommand::SetKey { .. } => settings,
    })
}

fn require_url(url: String) -> Result<String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        bail!("'{}' is not an http(s) URL", url)
    }
}

fn describe(settings: &ChatSettings) -> String {
    format!(
        "model: {}\napi_base: {}\nmcp_url: {}\nmax_tool_cycles: {}\nrequire_tools: {}\n",
        settings.model,
        settings.api_base,
        settings.mcp_url,
        settings.max_tool_cycles,
        settings.require_tools
    )
}

async fn read_key() -> Result<String> {
    eprintln!("Paste the OpenRouter API key and press Enter:");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    Ok(lines.next_line().await?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodit_chat_core::FileConfigStore;

    #[test]
    fn test_apply_edits() {
        let settings = apply(
            ChatSettings::default(),
            ConfigCommand::SetModel { model: "openai/gpt-4o".into() },
        )
        .unwrap();
        assert_eq!(settings.model, "openai/gpt-4o");

        let settings = apply(settings, ConfigCommand::SetMaxCycles { cycles: 3 }).unwrap();
        assert_eq!(settings.max_tool_cycles, 3);
        assert_eq!(settings.model, "openai/gpt-4o");

        assert!(apply(ChatSettings::default(), ConfigCommand::SetMaxCycles { cycles: 0 }).is_err());
        assert!(apply(
            ChatSettings::default(),
            ConfigCommand::SetMcpUrl { url: "nodit-mcp.example".into() }
        )
        .is_err());
    }

    #[tokio::test]
    async fn test_edit_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("config.yaml"));

        let edited = apply(
            store.load().await.unwrap(),
            ConfigCommand::SetMcpUrl { url: "http://localhost:3000/mcp".into() },
        )
        .unwrap();
        store.save(&edited).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.mcp_url, "http://localhost:3000/mcp");
        assert!(describe(&loaded).contains("mcp_url: http://localhost:3000/mcp"));
    }
}
