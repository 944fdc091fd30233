//! Backend that forwards envelopes to an upstream notification service.
//!
//! # Responsibilities
//! - POST each envelope as JSON to `{base_url}/{route}`
//! - Propagate the request id upstream
//! - Pass the upstream status and body through unchanged
//!
//! # Design Decisions
//! - Route defaults to the operation id; configuration may override it
//! - Non-JSON upstream bodies are wrapped as `{"raw": "<text>"}`
//! - Transport errors become `502`, upstream timeouts `504`

use std::collections::BTreeMap;
use std::time::Duration;

use axum::http::StatusCode;
use futures_util::FutureExt;
use serde::Serialize;
use serde_json::{json, Value};

use crate::backend::{BackendError, OperationHandler};
use crate::config::schema::BackendConfig;
use crate::dispatch::{OperationId, OperationResult, ResponseCode, ResultFuture};
use crate::envelope::{RequestEnvelope, TransportContext};

/// Envelope as sent on the wire.
#[derive(Serialize)]
struct WireRequest<'a> {
    id: &'static str,
    #[serde(flatten)]
    envelope: &'a RequestEnvelope,
}

/// Forwards envelopes over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    routes: BTreeMap<OperationId, String>,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = url::Url::parse(&config.base_url)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let routes = config
            .routes
            .iter()
            .map(|(name, path)| -> Result<_, BackendError> {
                Ok((name.parse::<OperationId>()?, path.clone()))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            routes,
        })
    }

    /// Upstream URL for `operation`.
    pub fn endpoint(&self, operation: OperationId) -> String {
        let route = self
            .routes
            .get(&operation)
            .map(String::as_str)
            .unwrap_or(operation.as_str());
        format!("{}/{}", self.base_url, route.trim_start_matches('/'))
    }
}

impl OperationHandler for HttpBackend {
    fn handle(&self, envelope: RequestEnvelope, transport: &TransportContext) -> ResultFuture {
        let operation = envelope.operation;
        let url = self.endpoint(operation);
        let request_id = transport.request_id().to_string();
        let request = self
            .client
            .post(&url)
            .header("x-request-id", &request_id)
            .json(&WireRequest {
                id: operation.api_id(),
                envelope: &envelope,
            });

        async move {
            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => return transport_failure(operation, &request_id, &url, &e),
            };

            let status = response.status();
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => return transport_failure(operation, &request_id, &url, &e),
            };

            tracing::debug!(
                request_id = %request_id,
                operation = %operation,
                status = %status,
                "Upstream responded"
            );

            let body = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text).unwrap_or_else(|_| json!({ "raw": text }))
            };
            OperationResult::new(status, body)
        }
        .boxed()
    }
}

fn transport_failure(
    operation: OperationId,
    request_id: &str,
    url: &str,
    error: &reqwest::Error,
) -> OperationResult {
    tracing::error!(
        request_id = %request_id,
        operation = %operation,
        url = %url,
        error = %error,
        "Upstream request failed"
    );

    let (status, err) = if error.is_timeout() {
        (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT")
    } else {
        (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE")
    };
    OperationResult::failure(
        status,
        operation,
        request_id,
        ResponseCode::ServerError,
        err,
        "notification backend request failed",
    )
}
