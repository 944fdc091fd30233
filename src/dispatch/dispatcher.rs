//! Envelope dispatch to the backend operation handler.

use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::Value;
use tracing::Instrument;

use crate::backend::OperationHandler;
use crate::dispatch::result::ResultFuture;
use crate::envelope::{RequestEnvelope, TransportContext};

/// Path-derived value written into the envelope parameters before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubIdentifier {
    pub key: &'static str,
    pub value: String,
}

impl SubIdentifier {
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// Routes envelopes to the backend handler.
///
/// Holds no per-request state; cloning shares the handler.
#[derive(Clone)]
pub struct Dispatcher {
    handler: Arc<dyn OperationHandler>,
}

impl Dispatcher {
    pub fn new(handler: Arc<dyn OperationHandler>) -> Self {
        Self { handler }
    }

    /// Forward `envelope` to the operation it names.
    ///
    /// A sub-identifier overwrites any body value under the same key. The
    /// handler is invoked exactly once and its result is returned unchanged.
    pub fn dispatch(
        &self,
        mut envelope: RequestEnvelope,
        sub_identifier: Option<SubIdentifier>,
        transport: &TransportContext,
    ) -> ResultFuture {
        if let Some(sub) = sub_identifier {
            envelope
                .parameters
                .insert(sub.key.to_string(), Value::String(sub.value));
        }

        let span = tracing::info_span!(
            "dispatch",
            request_id = %transport.request_id(),
            operation = %envelope.operation,
            delivery_mode = %envelope.delivery_mode(),
        );
        tracing::debug!(
            parent: &span,
            parameters = envelope.parameters.len(),
            "Forwarding envelope to backend"
        );

        self.handler
            .handle(envelope, transport)
            .instrument(span)
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::EchoBackend;
    use crate::dispatch::OperationId;
    use crate::envelope::{build_envelope, RawRequest};
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(EchoBackend))
    }

    #[tokio::test]
    async fn test_sub_identifier_overwrites_body_value() {
        let raw = RawRequest::json(&json!({"userId": "from-body", "limit": 5}));
        let transport = TransportContext::new("req-1", raw.clone());
        let envelope = build_envelope(&raw, OperationId::ReadFeed).unwrap();

        let result = dispatcher()
            .dispatch(envelope, Some(SubIdentifier::new("userId", "u123")), &transport)
            .await;

        assert_eq!(result.body["result"]["params"]["userId"], "u123");
        assert_eq!(result.body["result"]["params"]["limit"], 5);
    }

    #[tokio::test]
    async fn test_without_sub_identifier_body_untouched() {
        let raw = RawRequest::json(&json!({"userId": "from-body"}));
        let transport = TransportContext::new("req-2", raw.clone());
        let envelope = build_envelope(&raw, OperationId::UpdateFeed).unwrap();

        let result = dispatcher().dispatch(envelope, None, &transport).await;

        assert_eq!(result.body["result"]["params"]["userId"], "from-body");
        assert_eq!(result.body["result"]["operation"], "update-feed");
    }
}
