//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the store project URL.
pub const ENV_STORE_URL: &str = "SUPA_URL";
/// Environment variable holding the store API key.
pub const ENV_STORE_KEY: &str = "SUPA_KEY";
/// Environment variable holding the listen port (or full address).
pub const ENV_PORT: &str = "PORT";
/// Environment variable holding the log level.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration.
///
/// Reads the TOML file when a path is given (defaults otherwise), then applies
/// overrides from the process environment.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply environment overrides using `lookup` to resolve variables.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_STORE_URL) {
        config.store.url = url;
    }
    if let Some(key) = lookup(ENV_STORE_KEY) {
        config.store.key = key;
    }
    if let Some(port) = lookup(ENV_PORT) {
        config.listener.bind_address = normalize_bind_address(&port);
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }
}

/// Turn a `PORT` value into a bind address.
///
/// Accepts `8080`, `:8080` or a full `host:port`.
pub fn normalize_bind_address(value: &str) -> String {
    let value = value.trim();
    if let Some(port) = value.strip_prefix(':') {
        format!("0.0.0.0:{}", port)
    } else if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        format!("0.0.0.0:{}", value)
    } else {
        value.to_string()
    }
}
