//! Inbound request as seen at the transport boundary.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue};

/// The inbound request as received by the transport layer.
///
/// Headers are case-insensitive and multi-valued. The body is kept as raw
/// bytes so that structural validation happens in one place (the builder).
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    pub headers: HeaderMap,
    pub body: Bytes,
    pub path_params: Vec<(String, String)>,
}

impl RawRequest {
    pub fn new(headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            headers,
            body: body.into(),
            path_params: Vec::new(),
        }
    }

    /// Build a request carrying a JSON body with the matching content type.
    pub fn json(value: &serde_json::Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Self::new(headers, value.to_string())
    }

    pub fn with_header(mut self, name: &'static str, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push((name.into(), value.into()));
        self
    }

    /// Content type without parameters, lowercased.
    pub fn content_type(&self) -> Option<String> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
    }

    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Per-request transport state handed to the dispatcher and the backend.
///
/// Holds the ambient request the framework bound to the call and the
/// request id assigned at the edge.
#[derive(Debug, Clone)]
pub struct TransportContext {
    request_id: String,
    request: RawRequest,
}

impl TransportContext {
    pub fn new(request_id: impl Into<String>, request: RawRequest) -> Self {
        Self {
            request_id: request_id.into(),
            request,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn request(&self) -> &RawRequest {
        &self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_strips_parameters() {
        let req = RawRequest::default().with_header(
            "content-type",
            HeaderValue::from_static("Application/JSON; charset=utf-8"),
        );
        assert_eq!(req.content_type().as_deref(), Some("application/json"));
    }

    #[test]
    fn test_path_param_last_wins() {
        let req = RawRequest::default()
            .with_path_param("userId", "a")
            .with_path_param("userId", "b");
        assert_eq!(req.path_param("userId"), Some("b"));
        assert_eq!(req.path_param("missing"), None);
    }
}
