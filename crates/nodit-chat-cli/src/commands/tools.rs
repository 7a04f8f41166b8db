//! `tools`: catalog listing

use anyhow::{bail, Result};
use nodit_chat_core::{ToolCategory, ToolFilter, ToolInfo};

use crate::cli::Cli;
use crate::context::AppContext;

pub async fn run(
    cli: &Cli,
    category: Option<&str>,
    search: Option<&str>,
    categories: bool,
) -> Result<()> {
    if cli.no_tools {
        bail!("'tools' needs the MCP server; drop --no-tools");
    }

    let ctx = AppContext::load(cli).await?;
    let registry = ctx.registry().await;
    if !registry.is_ready() {
        bail!("MCP server at {} is not available", ctx.settings.mcp_url);
    }

    if categories {
        for label in registry.categories() {
            println!("{}", label);
        }
        return Ok(());
    }

    let filter = build_filter(category, search)?;
    let tools = registry.tools(&filter);
    if tools.is_empty() {
        println!("No tools found");
        return Ok(());
    }

    println!("{} of {} tools", tools.len(), registry.tool_count());
    for tool in &tools {
        println!("{}", format_tool(tool));
    }
    Ok(())
}

fn build_filter(category: Option<&str>, search: Option<&str>) -> Result<ToolFilter> {
    let mut filter = ToolFilter::new();
    match category {
        None => {}
        Some(label) if label.eq_ignore_ascii_case("all") => {}
        Some(label) => match ToolCategory::from_label(label) {
            Some(category) => filter = filter.with_category(category),
            None => {
                let known: Vec<&str> = ToolCategory::ALL.iter().map(|c| c.label()).collect();
                bail!("unknown category '{}' (expected one of: {})", label, known.join(", "));
            }
        },
    }
    if let Some(term) = search {
        filter = filter.with_search(term);
    }
    Ok(filter)
}

fn format_tool(tool: &ToolInfo) -> String {
    let mut out = format!("\n{}  [{}]\n  {}", tool.name(), tool.category, tool.description());
    if !tool.capabilities.is_empty() {
        out.push_str(&format!("\n  params: {}", tool.capabilities.join(", ")));
    }
    out
}
