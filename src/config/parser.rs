use super::FileConfig;
use crate::errors::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Loads and parses a runner configuration file
///
/// Files ending in `.toml` are read as TOML, everything else as YAML.
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be read
/// * The content cannot be parsed into a FileConfig
pub fn load_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let shown = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: shown.clone(),
        source,
    })?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let config: FileConfig = if is_toml {
        toml::from_str(&raw).map_err(|source| ConfigError::Toml {
            path: shown.clone(),
            source,
        })?
    } else if raw.trim().is_empty() {
        FileConfig::default()
    } else {
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Yaml {
            path: shown.clone(),
            source,
        })?
    };

    info!("Loaded configuration from {}", shown);
    Ok(config)
}

/// Location looked up when no `--config` is given: `<config dir>/workers-ai/config.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("workers-ai").join("config.yaml"))
}

/// Loads the explicitly requested file, or the default one if it exists.
///
/// An explicit path that cannot be read is an error; a missing default file is not.
pub fn load_optional_config(explicit: Option<&Path>) -> Result<Option<FileConfig>, ConfigError> {
    if let Some(path) = explicit {
        return load_config_file(path).map(Some);
    }
    match default_config_path() {
        Some(path) if path.is_file() => load_config_file(&path).map(Some),
        _ => {
            debug!("No configuration file found, using environment and flags only");
            Ok(None)
        }
    }
}
