//! `chat` and `ask`

use std::sync::Arc;

use anyhow::{bail, Result};
use nodit_chat_core::{
    CancellationToken, Orchestrator, OrchestratorError, OrchestratorResult, Transcript,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::Cli;
use crate::context::AppContext;
use crate::render::print_messages;

const MISSING_KEY_HINT: &str =
    "No OpenRouter API key found. Run 'nodit-chat config set-key' or set OPENROUTER_API_KEY.";

/// Single turn; exits non-zero when the turn fails
pub async fn ask(cli: &Cli, text: &str) -> Result<()> {
    let ctx = AppContext::load(cli).await?;
    if ctx.api_key().is_none() {
        bail!(MISSING_KEY_HINT);
    }

    let orchestrator = ctx.orchestrator(ctx.registry().await, Arc::new(Transcript::new()));
    let mark = orchestrator.transcript().last_id();
    let result = run_turn(&orchestrator, text).await;
    print_messages(&orchestrator.transcript().since(mark));

    exit_status(result)
}

/// Turn failures were already printed from the transcript; only the exit status is left
fn exit_status(result: OrchestratorResult<String>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.is_rejection() => Err(e.into()),
        Err(_) => bail!("the message could not be answered"),
    }
}

/// Interactive loop over stdin
pub async fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::load(cli).await?;
    if ctx.api_key().is_none() {
        eprintln!("{}", MISSING_KEY_HINT);
    }

    let registry = ctx.registry().await;
    let orchestrator = ctx.orchestrator(registry, Arc::new(Transcript::with_greeting()));
    println!(
        "model: {} | tools: {} ({})",
        ctx.settings.model,
        orchestrator.registry().enabled_tool_count(),
        orchestrator.registry().state()
    );
    print_messages(&orchestrator.transcript().messages());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/quit" | "/exit" => break,
            "/tools" => {
                let registry = orchestrator.registry();
                println!("{} ({} tools)", registry.state(), registry.enabled_tool_count());
                continue;
            }
            "/retry" => {
                match orchestrator.registry().retry().await {
                    Ok(count) => println!("connected ({} tools)", count),
                    Err(e) => eprintln!("✗ {}", e),
                }
                continue;
            }
            _ => {}
        }

        let mark = orchestrator.transcript().last_id();
        match run_turn(&orchestrator, line).await {
            Err(OrchestratorError::MissingApiKey) => eprintln!("{}", MISSING_KEY_HINT),
            Err(e) if e.is_rejection() => eprintln!("✗ {}", e),
            _ => {}
        }
        print_messages(&orchestrator.transcript().since(mark));
    }

    Ok(())
}

/// Run a turn; Ctrl+C cancels it at the next tool or request boundary
async fn run_turn(orchestrator: &Orchestrator, text: &str) -> OrchestratorResult<String> {
    let token = CancellationToken::new();
    let turn = orchestrator.run_with_cancel(text, &token);
    tokio::pin!(turn);

    tokio::select! {
        result = &mut turn => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("Interrupt received, cancelling turn");
            token.cancel();
            turn.await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status() {
        assert!(exit_status(Ok("Block 100".into())).is_ok());

        let rejected = exit_status(Err(OrchestratorError::Busy)).unwrap_err();
        assert_eq!(rejected.to_string(), "A request is already in progress");

        let failed = exit_status(Err(OrchestratorError::Cancelled)).unwrap_err();
        assert_eq!(failed.to_string(), "the message could not be answered");
    }
}
