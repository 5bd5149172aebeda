use std::fmt;

/// Errors raised while assembling the runner configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse YAML config {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("missing {field}: set it in the config file, the {env} environment variable or the --{flag} flag")]
    Missing {
        field: &'static str,
        env: &'static str,
        flag: &'static str,
    },
    #[error("invalid {field} '{value}': {reason}")]
    Invalid {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Coarse classification of a failed run, used for exit reporting and
/// for mapping failures onto HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Status,
    Decode,
    Api,
    Config,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Transport => "transport",
            FailureKind::Status => "status",
            FailureKind::Decode => "decode",
            FailureKind::Api => "api",
            FailureKind::Config => "config",
        };
        f.write_str(name)
    }
}

/// Errors produced by a single inference run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The request never produced a response (DNS, refused connection, timeout).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-2xx status. The raw body is kept as-is.
    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The endpoint answered 2xx but the body is not JSON.
    #[error("could not decode response (HTTP {status}): {reason}")]
    Decode {
        status: u16,
        reason: String,
        body: String,
    },

    /// The response envelope reports a failure or carries no generated text.
    #[error("inference API error: {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RunError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RunError::Transport { .. } => FailureKind::Transport,
            RunError::Status { .. } => FailureKind::Status,
            RunError::Decode { .. } => FailureKind::Decode,
            RunError::Api { .. } => FailureKind::Api,
            RunError::Config(_) => FailureKind::Config,
        }
    }

    /// HTTP status seen from the endpoint, if a response was received at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RunError::Status { status, .. }
            | RunError::Decode { status, .. }
            | RunError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
