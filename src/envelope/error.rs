//! Structured failure raised while normalizing a request.

use std::fmt;

use axum::http::StatusCode;

use crate::dispatch::ResponseCode;

/// Symbolic reason a request could not be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Body is not valid JSON.
    MalformedBody,
    /// Body is valid JSON but not an object.
    InvalidBodyShape,
    /// Non-empty body with a non-JSON content type.
    UnsupportedContentType,
    /// Correlation header value is not visible ASCII.
    InvalidHeader,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MalformedBody => "MALFORMED_BODY",
            ErrorKind::InvalidBodyShape => "INVALID_BODY_SHAPE",
            ErrorKind::UnsupportedContentType => "UNSUPPORTED_CONTENT_TYPE",
            ErrorKind::InvalidHeader => "INVALID_HEADER",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::UnsupportedContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure produced by the request builder. Consumed once by failure
/// translation; never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct DispatchError {
    pub kind: ErrorKind,
    pub response_code: ResponseCode,
    pub message: String,
}

impl DispatchError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            response_code: ResponseCode::ClientError,
            message: message.into(),
        }
    }

    pub fn malformed_body(source: &serde_json::Error) -> Self {
        Self::new(
            ErrorKind::MalformedBody,
            format!("request body is not valid JSON: {source}"),
        )
    }

    pub fn invalid_body_shape(found: &str) -> Self {
        Self::new(
            ErrorKind::InvalidBodyShape,
            format!("request body must be a JSON object, found {found}"),
        )
    }

    pub fn unsupported_content_type(content_type: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedContentType,
            format!("unsupported content type `{content_type}`, expected application/json"),
        )
    }

    pub fn invalid_header(name: &str) -> Self {
        Self::new(
            ErrorKind::InvalidHeader,
            format!("header `{name}` contains invalid characters"),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}
