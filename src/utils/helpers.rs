use crate::errors::RunError;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{IsTerminal, Read};
use std::time::Duration;

/// Spinner shown on stderr while a request is in flight.
///
/// Hidden when stderr is not a terminal so piped output stays clean.
pub fn request_spinner(message: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("-\\|/ ")
        .template("{spinner} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Resolves the text argument of a command, reading stdin for `-`.
pub fn read_text_arg(arg: &str) -> Result<String, std::io::Error> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Human-readable report of a failed run for the terminal.
pub fn describe_failure(err: &RunError) -> String {
    let mut out = format!("{} [{}] {}", "✗".red().bold(), err.kind(), err);
    match err {
        RunError::Decode { body, .. } if !body.is_empty() => {
            out.push_str(&format!("\n{} {}", "body:".dimmed(), body));
        }
        RunError::Transport { source, .. } if source.is_timeout() => {
            out.push_str(&format!("\n{}", "the request timed out; raise --timeout to wait longer".yellow()));
        }
        _ => {}
    }
    out
}
