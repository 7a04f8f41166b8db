//! Command-line argument parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "nodit-chat")]
#[command(version, about = "Chat with an OpenRouter model that can call Nodit MCP tools")]
#[command(
    long_about = "Chat with an OpenRouter model that can call the tools of a Nodit MCP server.\n\n\
Credentials:\n\
  Use 'nodit-chat config set-key' to store the OpenRouter API key in the system keyring.\n\n\
Environment Variables (fallback if no key is stored):\n\
  NODIT_CHAT_API_KEY   OpenRouter API key\n\
  OPENROUTER_API_KEY   OpenRouter API key\n\
  NODIT_CHAT_LOG       Log filter (default: warn)\n\n\
Chat commands:\n\
  /tools    Show the connection state and tool count\n\
  /retry    Reconnect to the MCP server\n\
  /quit     Leave the chat"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to use for this session (overrides the saved setting)
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Settings file to use instead of the per-user one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not connect to the MCP server
    #[arg(long, global = true)]
    pub no_tools: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Start an interactive chat (default)
    Chat,
    /// Send a single message and print the answer
    Ask {
        /// Message text
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// List the tools offered by the MCP server
    Tools {
        /// Only tools in this category (e.g. "Node Access")
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive match on name or description
        #[arg(short, long)]
        search: Option<String>,
        /// Print the category list instead of the tools
        #[arg(long)]
        categories: bool,
    },
    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigCommand {
    /// Print the current settings
    Show,
    /// Set the default model
    SetModel { model: String },
    /// Store the OpenRouter API key (read from stdin when omitted)
    SetKey { key: Option<String> },
    /// Set the chat-completion API base URL
    SetApiBase { url: String },
    /// Set the MCP server URL
    SetMcpUrl { url: String },
    /// Set the maximum number of tool-call cycles per message
    SetMaxCycles { cycles: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_chat() {
        let cli = Cli::try_parse_from(["nodit-chat"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.no_tools);
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::try_parse_from(["nodit-chat", "--no-tools", "ask", "what", "is", "block", "100"])
            .unwrap();
        assert!(cli.no_tools);
        assert_eq!(
            cli.command,
            Some(Commands::Ask {
                text: vec!["what".into(), "is".into(), "block".into(), "100".into()]
            })
        );
    }

    #[test]
    fn test_tools_filters() {
        let cli = Cli::try_parse_from([
            "nodit-chat", "tools", "--category", "Node Access", "--search", "block",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Tools {
                category: Some("Node Access".into()),
                search: Some("block".into()),
                categories: false,
            })
        );
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["nodit-chat", "config", "set-max-cycles", "5"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommand::SetMaxCycles { cycles: 5 }
            })
        );

        let cli = Cli::try_parse_from(["nodit-chat", "config", "set-key"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommand::SetKey { key: None }
            })
        );

        assert!(Cli::try_parse_from(["nodit-chat", "config", "set-max-cycles", "many"]).is_err());
    }

    #[test]
    fn test_global_model_after_subcommand() {
        let cli = Cli::try_parse_from(["nodit-chat", "ask", "-m", "openai/gpt-4o", "hi"]).unwrap();
        assert_eq!(cli.model.as_deref(), Some("openai/gpt-4o"));
    }
}
