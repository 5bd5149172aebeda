//! Main entry point for the application.
//!
//! Loads `.env`, parses the command line, initializes logging, resolves the
//! runner configuration and dispatches to the requested command:
//! - `run`: send one conversation and print the decoded response (default)
//! - `action`: apply a writing preset to some text
//! - `chat`: interactive multi-turn conversation
//! - `ping`: check credentials against a small model
//! - `serve`: expose the runner over HTTP

mod actions;
mod api;
mod cli;
mod config;
mod constants;
mod errors;
mod llm;
mod session;
mod utils;

use clap::Parser;
use cli::{Cli, Command};
use colored::*;
use config::RunnerConfig;
use dialoguer::{theme::ColorfulTheme, Input};
use errors::RunError;
use llm::LlmClient;
use session::ChatSession;
use std::process::ExitCode;
use tracing::{debug, error, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_result = dotenvy::dotenv();
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or_default();
    utils::init_logging(&cli.logging_level, matches!(command, Command::Serve { .. }));

    if let Err(e) = dotenv_result {
        debug!("No .env file loaded: {}", e);
    }

    let config = match config::load_optional_config(cli.config.as_deref())
        .and_then(|file| RunnerConfig::resolve(file, cli.overrides()))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "✗ configuration error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    debug!("Resolved configuration: {:?}", config);

    match execute(command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(status = ?e.status(), "{}", e);
            eprintln!("{}", utils::describe_failure(&e));
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Command, config: &RunnerConfig) -> Result<(), RunError> {
    let client = LlmClient::new(config)?;
    debug!("Default endpoint: {}", client.endpoint());

    match command {
        Command::Run { messages, text } => {
            let messages = if messages.is_empty() {
                config.messages.clone()
            } else {
                messages
            };
            let spinner = utils::request_spinner(&format!("Running {}...", client.model()));
            let result = client.run(&messages).await;
            spinner.finish_and_clear();
            let response = result?;

            if text {
                println!("{}", response.into_text()?);
            } else {
                if response.envelope_success() == Some(false) {
                    warn!("Endpoint reported success=false: {:?}", response.error_messages());
                }
                let pretty = serde_json::to_string_pretty(&response.body)
                    .unwrap_or_else(|_| response.body.to_string());
                println!("{}", pretty);
            }
        }
        Command::Action { action, text } => {
            let input = utils::read_text_arg(&text).map_err(|e| {
                RunError::Config(errors::ConfigError::Invalid {
                    field: "text",
                    value: text.clone(),
                    reason: e.to_string(),
                })
            })?;
            let spinner = utils::request_spinner(&format!("{}...", action.title()));
            let result = action.apply(&client, &input).await;
            spinner.finish_and_clear();
            println!("{}", result?);
        }
        Command::Chat { system, export } => {
            run_chat(&client, config, system.as_deref(), export).await;
        }
        Command::Ping => {
            let spinner = utils::request_spinner("Testing credentials...");
            let result = client.ping().await;
            spinner.finish_and_clear();
            result?;
            println!("{}", "✓ Workers AI test successful!".green().bold());
        }
        Command::Serve { port } => {
            println!(
                "{} {}",
                "🌐 Serving Workers AI bridge on port".cyan(),
                port.to_string().bold()
            );
            if let Err(e) = api::server::launch_server(port, client).await {
                error!("Failed to start server: {}", e);
                return Err(RunError::Config(errors::ConfigError::Invalid {
                    field: "port",
                    value: port.to_string(),
                    reason: e.to_string(),
                }));
            }
        }
    }
    Ok(())
}

/// Interactive loop; an empty line or `/exit` ends the session.
async fn run_chat(client: &LlmClient, config: &RunnerConfig, system: Option<&str>, export: bool) {
    println!(
        "{}",
        format!("\n🤖 Chatting with {}", client.model()).bold().cyan()
    );
    println!("{}", "Press Enter on an empty line to quit.".yellow());

    let mut session = ChatSession::new(system);
    loop {
        let input: String = match Input::with_theme(&ColorfulTheme::default())
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        };
        let input = input.trim();
        if input.is_empty() || input == "/exit" {
            break;
        }

        let spinner = utils::request_spinner("Thinking...");
        let result = session.send(client, input).await;
        spinner.finish_and_clear();
        match result {
            Ok(reply) => println!("{} {}\n", "AI |>".green().bold(), reply),
            Err(e) => eprintln!("{}", utils::describe_failure(&e)),
        }
    }

    if export && session.turns() > 0 {
        match session.export(&config.export_dir) {
            Ok(path) => println!("📝 Conversation exported to {}", path.display()),
            Err(e) => error!("Failed to export conversation: {}", e),
        }
    }
}
