//! Backend that answers every operation with the envelope it received.

use futures_util::future;
use futures_util::FutureExt;
use serde_json::json;

use crate::backend::OperationHandler;
use crate::dispatch::{OperationResult, ResultFuture};
use crate::envelope::{RequestEnvelope, TransportContext};

/// Resolves immediately with `200 OK` and the envelope in `result`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoBackend;

impl OperationHandler for EchoBackend {
    fn handle(&self, envelope: RequestEnvelope, transport: &TransportContext) -> ResultFuture {
        let result = OperationResult::success(
            envelope.operation,
            transport.request_id(),
            json!({
                "operation": envelope.operation,
                "params": envelope.parameters,
                "headers": envelope.headers,
                "context": envelope.context,
            }),
        );
        future::ready(result).boxed()
    }
}
