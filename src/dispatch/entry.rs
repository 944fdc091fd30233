//! Entry-point table and the shared dispatch pipeline.
//!
//! Every public operation is one [`EntryPoint`] record run through
//! [`Dispatcher::dispatch_operation`]. This table is the only place that
//! maps entry points to operation identifiers.

use crate::dispatch::dispatcher::SubIdentifier;
use crate::dispatch::result::ResultFuture;
use crate::dispatch::{Dispatcher, OperationId};
use crate::envelope::{build_envelope, DeliveryMode, RawRequest, TransportContext};

/// Which request supplies the raw body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySource {
    /// The request the transport bound to the call.
    Ambient,
    /// A request passed explicitly by the caller alongside path values.
    Explicit,
}

/// Static configuration of one public entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPoint {
    pub name: &'static str,
    pub body_source: BodySource,
    pub force_sync: bool,
    pub operation: OperationId,
    /// Parameter key that receives the path value, if any.
    pub path_injection: Option<&'static str>,
}

pub const SEND_NOTIFICATION: EntryPoint = EntryPoint {
    name: "send_notification",
    body_source: BodySource::Ambient,
    force_sync: false,
    operation: OperationId::SendNotification,
    path_injection: None,
};

pub const SEND_SYNC_NOTIFICATION: EntryPoint = EntryPoint {
    name: "send_sync_notification",
    body_source: BodySource::Ambient,
    force_sync: true,
    operation: OperationId::SendNotification,
    path_injection: None,
};

pub const VERIFY_OTP: EntryPoint = EntryPoint {
    name: "verify_otp",
    body_source: BodySource::Ambient,
    force_sync: false,
    operation: OperationId::VerifyOtp,
    path_injection: None,
};

// v2 notifications are always delivered synchronously.
pub const SEND_V2_NOTIFICATION: EntryPoint = EntryPoint {
    name: "send_v2_notification",
    body_source: BodySource::Ambient,
    force_sync: true,
    operation: OperationId::CreateNotificationV2,
    path_injection: None,
};

pub const READ_FEED_NOTIFICATION: EntryPoint = EntryPoint {
    name: "read_feed_notification",
    body_source: BodySource::Explicit,
    force_sync: false,
    operation: OperationId::ReadFeed,
    path_injection: Some("userId"),
};

pub const UPDATE_NOTIFICATION_FEED: EntryPoint = EntryPoint {
    name: "update_notification_feed",
    body_source: BodySource::Ambient,
    force_sync: false,
    operation: OperationId::UpdateFeed,
    path_injection: None,
};

pub const ENTRY_POINTS: [EntryPoint; 6] = [
    SEND_NOTIFICATION,
    SEND_SYNC_NOTIFICATION,
    VERIFY_OTP,
    SEND_V2_NOTIFICATION,
    READ_FEED_NOTIFICATION,
    UPDATE_NOTIFICATION_FEED,
];

impl BodySource {
    fn select<'a>(
        self,
        entry: &EntryPoint,
        transport: &'a TransportContext,
        explicit: Option<&'a RawRequest>,
    ) -> &'a RawRequest {
        match (self, explicit) {
            (BodySource::Ambient, _) => transport.request(),
            (BodySource::Explicit, Some(request)) => request,
            (BodySource::Explicit, None) => {
                panic!("entry point `{}` requires an explicit request", entry.name)
            }
        }
    }
}

impl Dispatcher {
    /// Run one entry point: build, annotate, then dispatch or translate.
    ///
    /// # Panics
    /// If `entry` reads an explicit request and none is supplied. That is a
    /// wiring defect in the caller, not a request error.
    pub fn dispatch_operation(
        &self,
        entry: &EntryPoint,
        transport: &TransportContext,
        explicit: Option<&RawRequest>,
        path_value: Option<&str>,
    ) -> ResultFuture {
        let raw = entry.body_source.select(entry, transport, explicit);

        match build_envelope(raw, entry.operation) {
            Ok(mut envelope) => {
                envelope.context.default_request_id(transport.request_id());
                if entry.force_sync {
                    envelope.set_delivery_mode(DeliveryMode::Sync);
                }
                let sub_identifier = entry
                    .path_injection
                    .zip(path_value)
                    .map(|(key, value)| SubIdentifier::new(key, value));
                self.dispatch(envelope, sub_identifier, transport)
            }
            Err(error) => {
                tracing::warn!(
                    request_id = %transport.request_id(),
                    entry_point = entry.name,
                    kind = %error.kind,
                    error = %error.message,
                    "Rejected malformed request"
                );
                self.translate_failure(error, entry.operation, transport, None)
            }
        }
    }
}
