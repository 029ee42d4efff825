//! CLI command definitions for the `chatlog` binary.

pub mod conversation;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Store and answer chat conversations.
#[derive(Parser)]
#[command(name = "chatlog", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Port to listen on (default from config.toml, else 8000).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default from config.toml, else 0.0.0.0).
        #[arg(long)]
        host: Option<String>,
    },

    /// Show store connectivity and provider status.
    Status,

    /// List conversations, most recent first.
    #[command(alias = "ls")]
    Conversations,

    /// Show the messages of a conversation.
    Messages {
        /// Conversation id.
        conversation_id: String,
    },

    /// Send one message and print the reply.
    Send {
        /// Message text.
        text: String,

        /// Continue an existing conversation instead of starting a new one.
        #[arg(short, long)]
        conversation: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_send_with_conversation() {
        let cli = Cli::try_parse_from(["chatlog", "send", "hello", "--conversation", "abc", "--json"])
            .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Send { text, conversation } => {
                assert_eq!(text, "hello");
                assert_eq!(conversation.as_deref(), Some("abc"));
            }
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn test_parse_serve_defaults_to_config() {
        let cli = Cli::try_parse_from(["chatlog", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { port, host } => {
                assert!(port.is_none());
                assert!(host.is_none());
            }
            _ => panic!("expected serve"),
        }
    }
}
