use crate::actions::WritingAction;
use crate::config::ConfigOverrides;
use crate::constants::{ACCOUNT_ID_ENV, API_TOKEN_ENV, DEFAULT_API_PORT};
use crate::llm::ChatMessage;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Command line client for Cloudflare Workers AI
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Path to a YAML or TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    #[arg(long, global = true, default_value_t = String::from("warn"))]
    pub logging_level: String,

    /// Cloudflare account identifier
    #[arg(long, global = true, env = ACCOUNT_ID_ENV)]
    pub account_id: Option<String>,

    /// Workers AI API token
    #[arg(long, global = true, env = API_TOKEN_ENV, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Model path segment, e.g. "@cf/meta/llama-3-8b-instruct"
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// API root the account path is appended to
    #[arg(long, global = true)]
    pub api_root: Option<String>,

    /// Request timeout, e.g. "30s" or "2m"
    #[arg(long, global = true, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Send one conversation and print the decoded response
    Run {
        /// Message as ROLE:CONTENT; repeat to build a conversation
        #[arg(long = "message", value_parser = ChatMessage::parse_pair)]
        messages: Vec<ChatMessage>,

        /// Print only the generated text instead of the full JSON response
        #[arg(long)]
        text: bool,
    },
    /// Apply a writing preset to some text ("-" reads stdin)
    Action {
        #[arg(value_enum)]
        action: WritingAction,
        text: String,
    },
    /// Interactive multi-turn chat
    Chat {
        /// Optional system prompt opening the conversation
        #[arg(long)]
        system: Option<String>,

        /// Write the conversation to a JSON file on exit
        #[arg(long)]
        export: bool,
    },
    /// Check that the account id and token are accepted
    Ping,
    /// Serve the HTTP bridge
    Serve {
        #[arg(long, default_value_t = DEFAULT_API_PORT)]
        port: u16,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Run {
            messages: Vec::new(),
            text: false,
        }
    }
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            account_id: self.account_id.clone(),
            api_token: self.api_token.clone(),
            model: self.model.clone(),
            api_root: self.api_root.clone(),
            timeout: self.timeout,
        }
    }
}

fn parse_duration(raw: &str) -> Result<Duration, String> {
    crate::config::parse_timeout(raw).map_err(|e| e.to_string())
}
