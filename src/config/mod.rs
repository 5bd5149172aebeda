mod parser;

use crate::constants::*;
use crate::errors::ConfigError;
use crate::llm::ChatMessage;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub use parser::load_optional_config;

/// A credential that must not leak into logs or debug output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Contents of an on-disk config file. Every field is optional so a file can
/// set only what it needs and leave the rest to the environment or flags.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Cloudflare account identifier
    #[serde(default)]
    pub account_id: Option<String>,
    /// Workers AI API token
    #[serde(default)]
    pub api_token: Option<Secret>,
    /// Model path segment, e.g. "@cf/meta/llama-3-8b-instruct"
    #[serde(default)]
    pub model: Option<String>,
    /// API root the account path is appended to
    #[serde(default)]
    pub api_root: Option<String>,
    /// Request timeout, as a humantime string such as "30s"
    #[serde(default)]
    pub timeout: Option<String>,
    /// Conversation sent by `run` when no message is given on the command line
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
    /// Directory receiving exported chat transcripts
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

/// Values taken from command-line flags and their environment fallbacks.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub account_id: Option<String>,
    pub api_token: Option<String>,
    pub model: Option<String>,
    pub api_root: Option<String>,
    pub timeout: Option<Duration>,
}

/// Fully resolved settings handed to the runner at construction time.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub account_id: String,
    pub api_token: Secret,
    pub model: String,
    pub api_root: String,
    pub timeout: Duration,
    pub messages: Vec<ChatMessage>,
    pub export_dir: PathBuf,
}

impl RunnerConfig {
    /// Merges defaults, the optional config file and the overrides, in that order.
    pub fn resolve(
        file: Option<FileConfig>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();

        let account_id = non_empty(overrides.account_id)
            .or(non_empty(file.account_id))
            .ok_or(ConfigError::Missing {
                field: "account id",
                env: ACCOUNT_ID_ENV,
                flag: "account-id",
            })?;

        let api_token = non_empty(overrides.api_token)
            .map(Secret::new)
            .or(file.api_token.filter(|s| !s.expose().is_empty()))
            .ok_or(ConfigError::Missing {
                field: "API token",
                env: API_TOKEN_ENV,
                flag: "api-token",
            })?;

        let api_root = overrides
            .api_root
            .or(file.api_root)
            .unwrap_or_else(|| DEFAULT_API_ROOT.to_string());
        validate_api_root(&api_root)?;

        let timeout = match (overrides.timeout, file.timeout) {
            (Some(t), _) => t,
            (None, Some(raw)) => parse_timeout(&raw)?,
            (None, None) => DEFAULT_TIMEOUT,
        };

        Ok(RunnerConfig {
            account_id,
            api_token,
            model: overrides
                .model
                .or(file.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_root: api_root.trim_end_matches('/').to_string(),
            timeout,
            messages: file.messages.unwrap_or_else(default_messages),
            export_dir: file.export_dir.unwrap_or_else(|| PathBuf::from(LOG_DIR)),
        })
    }

    /// Base URL every model identifier is appended to.
    pub fn run_base_url(&self) -> String {
        format!("{}/accounts/{}/ai/run/", self.api_root, self.account_id)
    }
}

/// The built-in two-turn conversation used when nothing else is configured.
pub fn default_messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(DEFAULT_SYSTEM_PROMPT),
        ChatMessage::user(DEFAULT_USER_PROMPT),
    ]
}

/// Parses a humantime duration, rejecting zero.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        field: "timeout",
        value: raw.to_string(),
        reason,
    };
    let duration = humantime::parse_duration(raw).map_err(|e| invalid(e.to_string()))?;
    if duration.is_zero() {
        return Err(invalid("timeout must be greater than zero".to_string()));
    }
    Ok(duration)
}

fn validate_api_root(raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw).map_err(|e| ConfigError::Invalid {
        field: "api root",
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid {
            field: "api root",
            value: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
