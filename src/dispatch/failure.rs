//! Translation of builder failures into operation results.
//!
//! # Design Decisions
//! - The backend is never reached on this path
//! - Any partially built envelope is dropped, never forwarded
//! - Returns a ready future so callers treat both branches alike

use futures_util::future;
use futures_util::FutureExt;

use crate::dispatch::result::{OperationResult, ResultFuture};
use crate::dispatch::{Dispatcher, OperationId};
use crate::envelope::{DispatchError, RequestEnvelope, TransportContext};

impl Dispatcher {
    /// Map `error` to a client-error result for `operation`.
    pub fn translate_failure(
        &self,
        error: DispatchError,
        operation: OperationId,
        transport: &TransportContext,
        partial: Option<RequestEnvelope>,
    ) -> ResultFuture {
        drop(partial);
        future::ready(failure_result(&error, operation, transport.request_id())).boxed()
    }
}

pub(crate) fn failure_result(
    error: &DispatchError,
    operation: OperationId,
    request_id: &str,
) -> OperationResult {
    OperationResult::failure(
        error.status(),
        operation,
        request_id,
        error.response_code,
        error.kind.as_str(),
        &error.message,
    )
}
