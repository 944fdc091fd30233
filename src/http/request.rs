//! Transport request extraction.
//!
//! # Responsibilities
//! - Collect the request body within the configured limit
//! - Carry headers and path parameters into a `RawRequest`
//! - Resolve the request id assigned by the request-id layer
//! - Replace a client id that is not visible ASCII with a generated one
//!
//! # Design Decisions
//! - No body validation here; that is the builder's job
//! - Oversized bodies are rejected with 413 before reaching the core

use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::envelope::{RawRequest, TransportContext};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Turn an axum request into the transport context of one call.
pub async fn extract_transport(
    request: Request,
    path_params: Vec<(String, String)>,
    max_body_size: usize,
) -> Result<TransportContext, Response> {
    let (mut parts, body) = request.into_parts();

    let request_id = match parts.headers.get(X_REQUEST_ID).map(HeaderValue::to_str) {
        Some(Ok(id)) => id.to_string(),
        _ => {
            let id = uuid::Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                parts.headers.insert(X_REQUEST_ID, value);
            }
            id
        }
    };

    let body = match axum::body::to_bytes(body, max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            return Err((StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response());
        }
    };

    let raw = RawRequest {
        headers: parts.headers,
        body,
        path_params,
    };
    Ok(TransportContext::new(request_id, raw))
}
