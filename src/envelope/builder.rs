//! Request builder: RawRequest → RequestEnvelope.
//!
//! # Responsibilities
//! - Enforce structural well-formedness of the transport payload
//! - Deep-copy the body object into envelope parameters (keys verbatim)
//! - Copy correlation headers into the envelope context
//!
//! # Design Decisions
//! - Empty or whitespace-only bodies are legal and yield no parameters
//! - A missing content type is parsed as JSON; an explicit non-JSON type
//!   with a non-empty body is rejected
//! - A client-supplied delivery mode header is never copied; only the
//!   entry point decides the delivery mode

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::dispatch::OperationId;
use crate::envelope::error::DispatchError;
use crate::envelope::raw::RawRequest;
use crate::envelope::types::{RequestContext, RequestEnvelope};

/// Normalize `raw` into an envelope for `operation`.
pub fn build_envelope(
    raw: &RawRequest,
    operation: OperationId,
) -> Result<RequestEnvelope, DispatchError> {
    let parameters = parse_parameters(raw)?;
    let context = RequestContext::from_headers(&raw.headers)?;

    Ok(RequestEnvelope {
        operation,
        parameters,
        headers: BTreeMap::new(),
        context,
    })
}

fn parse_parameters(raw: &RawRequest) -> Result<Map<String, Value>, DispatchError> {
    if raw.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    if let Some(content_type) = raw.content_type() {
        if !is_json_content_type(&content_type) {
            return Err(DispatchError::unsupported_content_type(&content_type));
        }
    }

    let value: Value =
        serde_json::from_slice(&raw.body).map_err(|e| DispatchError::malformed_body(&e))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(DispatchError::invalid_body_shape(json_kind(&other))),
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    content_type == "application/json" || content_type.ends_with("+json")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
