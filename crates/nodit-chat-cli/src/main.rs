//! nodit-chat: terminal chat against a Nodit MCP server
//!
//! Logging goes to stderr and is controlled by `NODIT_CHAT_LOG`
//! (`warn` unless set), e.g. `NODIT_CHAT_LOG=nodit_chat=debug`.

mod cli;
mod commands;
mod context;
mod render;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

const LOG_ENV: &str = "NODIT_CHAT_LOG";

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command.clone().unwrap_or(Commands::Chat) {
        Commands::Chat => commands::chat::run(&cli).await,
        Commands::Ask { text } => commands::chat::ask(&cli, &text.join(" ")).await,
        Commands::Tools {
            category,
            search,
            categories,
        } => commands::tools::run(&cli, category.as_deref(), search.as_deref(), categories).await,
        Commands::Config { command } => commands::config::run(&cli, command).await,
    }
}
