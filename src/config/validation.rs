//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check addresses parse and the backend URL is a usable HTTP base
//! - Check backend route keys name known operations
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: GatewayConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use crate::config::schema::{BackendMode, GatewayConfig};
use crate::dispatch::OperationId;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    BindAddress(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("invalid backend base URL `{url}`: {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("backend route `{0}` does not name a known operation")]
    UnknownRoute(String),

    #[error("backend route for `{0}` is empty")]
    EmptyRoute(String),

    #[error("invalid log level `{0}`")]
    LogLevel(String),

    #[error("invalid metrics address `{0}`")]
    MetricsAddress(String),
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    let backend = &config.backend;
    if backend.mode == BackendMode::Http {
        if let Err(reason) = check_base_url(&backend.base_url) {
            errors.push(ValidationError::BaseUrl {
                url: backend.base_url.clone(),
                reason,
            });
        }
        if backend.timeout_secs == 0 {
            errors.push(ValidationError::Zero("backend.timeout_secs"));
        }
    }
    for (name, path) in &backend.routes {
        if name.parse::<OperationId>().is_err() {
            errors.push(ValidationError::UnknownRoute(name.clone()));
        } else if path.trim().trim_matches('/').is_empty() {
            errors.push(ValidationError::EmptyRoute(name.clone()));
        }
    }

    let observability = &config.observability;
    if !LOG_LEVELS.contains(&observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::LogLevel(observability.log_level.clone()));
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Routes are appended to the path, so the base must be a plain
/// `http`/`https` URL without query or fragment.
fn check_base_url(base_url: &str) -> Result<(), String> {
    let url = url::Url::parse(base_url).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("query and fragment are not allowed".to_string());
    }
    Ok(())
}
