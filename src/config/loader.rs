//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `listener.bind_address`.
pub const BIND_ADDRESS_ENV: &str = "NOTIFY_GATEWAY_BIND";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse, apply environment overrides, and validate a TOML document.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let mut config: GatewayConfig = toml::from_str(content)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Default configuration with environment overrides, validated.
pub fn default_config() -> Result<GatewayConfig, ConfigError> {
    parse_config("")
}

fn apply_env_overrides(config: &mut GatewayConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(bind) = lookup(BIND_ADDRESS_ENV).filter(|v| !v.trim().is_empty()) {
        config.listener.bind_address = bind;
    }
}
