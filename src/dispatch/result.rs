//! Operation outcome shared by the dispatch and failure paths.

use std::fmt;

use axum::http::StatusCode;
use futures_util::future::BoxFuture;
use serde_json::{json, Value};

use crate::dispatch::OperationId;

/// Future returned by every entry point, on both branches.
pub type ResultFuture = BoxFuture<'static, OperationResult>;

/// Symbolic response code carried in response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Ok,
    ClientError,
    ServerError,
}

impl ResponseCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseCode::Ok => "OK",
            ResponseCode::ClientError => "CLIENT_ERROR",
            ResponseCode::ServerError => "SERVER_ERROR",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and payload of a dispatched operation or a translated failure.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    pub status: StatusCode,
    pub body: Value,
}

impl OperationResult {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// `200 OK` in the standard response shape.
    pub fn success(operation: OperationId, msg_id: &str, result: Value) -> Self {
        Self::new(
            StatusCode::OK,
            response_body(operation, msg_id, ResponseCode::Ok, None, result),
        )
    }

    /// Error in the standard response shape with an empty `result`.
    pub fn failure(
        status: StatusCode,
        operation: OperationId,
        msg_id: &str,
        code: ResponseCode,
        err: &str,
        errmsg: &str,
    ) -> Self {
        Self::new(
            status,
            response_body(operation, msg_id, code, Some((err, errmsg)), json!({})),
        )
    }
}

fn response_body(
    operation: OperationId,
    msg_id: &str,
    code: ResponseCode,
    error: Option<(&str, &str)>,
    result: Value,
) -> Value {
    let (status, err, errmsg) = match error {
        Some((err, errmsg)) => ("failed", Value::from(err), Value::from(errmsg)),
        None => ("successful", Value::Null, Value::Null),
    };
    json!({
        "id": operation.api_id(),
        "ver": "v1",
        "params": {
            "msgid": msg_id,
            "status": status,
            "err": err,
            "errmsg": errmsg,
        },
        "responseCode": code.as_str(),
        "result": result,
    })
}
