//! Normalized envelope types.

use std::collections::BTreeMap;
use std::fmt;

use axum::http::HeaderMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::dispatch::OperationId;
use crate::envelope::error::DispatchError;

/// Envelope header carrying the delivery mode.
pub const DELIVERY_MODE_HEADER: &str = "deliveryMode";

/// How the backend should schedule the work. Set, never interpreted, here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    #[default]
    Async,
    Sync,
}

impl DeliveryMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryMode::Async => "async",
            DeliveryMode::Sync => "sync",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Correlation headers copied into the envelope context: (header, key).
const CORRELATION_HEADERS: &[(&str, &str)] = &[
    ("x-request-id", "requestId"),
    ("x-session-id", "sessionId"),
    ("x-device-id", "deviceId"),
    ("x-app-id", "appId"),
    ("x-channel-id", "channelId"),
    ("x-consumer-id", "consumerId"),
    ("x-trace-enabled", "traceEnabled"),
    ("traceparent", "traceparent"),
];

/// Opaque correlation context copied from the raw request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestContext(BTreeMap<String, String>);

impl RequestContext {
    /// Copy the known correlation headers. Only the first value of a
    /// multi-valued header is kept.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, DispatchError> {
        let mut values = BTreeMap::new();
        for (name, key) in CORRELATION_HEADERS {
            if let Some(value) = headers.get(*name) {
                let value = value
                    .to_str()
                    .map_err(|_| DispatchError::invalid_header(name))?;
                values.insert((*key).to_string(), value.to_string());
            }
        }
        Ok(Self(values))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.get("requestId")
    }

    /// Fall back to `request_id` when no request id header was copied.
    pub fn default_request_id(&mut self, request_id: &str) {
        self.0
            .entry("requestId".to_string())
            .or_insert_with(|| request_id.to_string());
    }
}

/// The normalized unit of work forwarded to a backend operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope {
    pub operation: OperationId,
    #[serde(rename = "params")]
    pub parameters: Map<String, Value>,
    pub headers: BTreeMap<String, String>,
    pub context: RequestContext,
}

impl RequestEnvelope {
    /// Delivery mode from the envelope headers; absent means async.
    pub fn delivery_mode(&self) -> DeliveryMode {
        match self.headers.get(DELIVERY_MODE_HEADER).map(String::as_str) {
            Some("sync") => DeliveryMode::Sync,
            _ => DeliveryMode::Async,
        }
    }

    pub fn set_delivery_mode(&mut self, mode: DeliveryMode) {
        self.headers
            .insert(DELIVERY_MODE_HEADER.to_string(), mode.as_str().to_string());
    }

    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }
}
