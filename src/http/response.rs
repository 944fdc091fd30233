//! Response rendering.
//!
//! # Design Decisions
//! - Status and body come from the operation result as-is
//! - A `null` body renders as an empty response

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::dispatch::OperationResult;

impl IntoResponse for OperationResult {
    fn into_response(self) -> Response {
        match self.body {
            Value::Null => self.status.into_response(),
            body => (self.status, Json(body)).into_response(),
        }
    }
}
