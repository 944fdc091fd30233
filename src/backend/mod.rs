//! Backend operation handlers.
//!
//! # Responsibilities
//! - Define the single capability the dispatcher depends on
//! - Build the configured handler at startup
//!
//! # Design Decisions
//! - Handlers return a boxed `Send` future; the dispatcher never awaits it
//! - Backend failures are expressed as an `OperationResult`, which the
//!   gateway passes through unchanged
//! - No retry or queueing at this layer

pub mod echo;
pub mod http;

use std::sync::Arc;

use crate::config::schema::{BackendConfig, BackendMode};
use crate::dispatch::{OperationParseError, ResultFuture};
use crate::envelope::{RequestEnvelope, TransportContext};

pub use echo::EchoBackend;
pub use http::HttpBackend;

/// Asynchronous executor of backend operations.
///
/// The envelope names the operation to run.
pub trait OperationHandler: Send + Sync {
    fn handle(&self, envelope: RequestEnvelope, transport: &TransportContext) -> ResultFuture;
}

/// Error constructing a backend from configuration.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid backend base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("invalid backend route: {0}")]
    Route(#[from] OperationParseError),
}

/// Build the handler selected by `config.mode`.
pub fn from_config(config: &BackendConfig) -> Result<Arc<dyn OperationHandler>, BackendError> {
    let handler: Arc<dyn OperationHandler> = match config.mode {
        BackendMode::Http => Arc::new(HttpBackend::new(config)?),
        BackendMode::Echo => Arc::new(EchoBackend),
    };
    tracing::info!(mode = ?config.mode, "Backend handler initialized");
    Ok(handler)
}
