//! Notification entry points.
//!
//! Each public operation is a single call into the shared pipeline with its
//! row of the entry-point table. Notifications can be sent on email, SMS,
//! push or feed; the backend decides which.

use crate::dispatch::entry::{
    EntryPoint, READ_FEED_NOTIFICATION, SEND_NOTIFICATION, SEND_SYNC_NOTIFICATION,
    SEND_V2_NOTIFICATION, UPDATE_NOTIFICATION_FEED, VERIFY_OTP,
};
use crate::dispatch::{Dispatcher, ResultFuture};
use crate::envelope::{RawRequest, TransportContext};

#[derive(Clone)]
pub struct NotificationController {
    dispatcher: Dispatcher,
}

impl NotificationController {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn send_notification(&self, transport: &TransportContext) -> ResultFuture {
        self.run(&SEND_NOTIFICATION, transport, None, None)
    }

    /// Same as [`send_notification`](Self::send_notification) with
    /// `deliveryMode=sync`.
    pub fn send_sync_notification(&self, transport: &TransportContext) -> ResultFuture {
        self.run(&SEND_SYNC_NOTIFICATION, transport, None, None)
    }

    pub fn verify_otp(&self, transport: &TransportContext) -> ResultFuture {
        self.run(&VERIFY_OTP, transport, None, None)
    }

    pub fn send_v2_notification(&self, transport: &TransportContext) -> ResultFuture {
        self.run(&SEND_V2_NOTIFICATION, transport, None, None)
    }

    /// Read the feed of `user_id`. The body comes from `request`, and
    /// `user_id` always overwrites any `userId` it carries.
    pub fn read_feed_notification(
        &self,
        user_id: &str,
        request: &RawRequest,
        transport: &TransportContext,
    ) -> ResultFuture {
        self.run(&READ_FEED_NOTIFICATION, transport, Some(request), Some(user_id))
    }

    pub fn update_notification_feed(&self, transport: &TransportContext) -> ResultFuture {
        self.run(&UPDATE_NOTIFICATION_FEED, transport, None, None)
    }

    fn run(
        &self,
        entry: &EntryPoint,
        transport: &TransportContext,
        explicit: Option<&RawRequest>,
        path_value: Option<&str>,
    ) -> ResultFuture {
        tracing::info!(
            request_id = %transport.request_id(),
            entry_point = entry.name,
            "Method call started"
        );
        let response = self
            .dispatcher
            .dispatch_operation(entry, transport, explicit, path_value);
        tracing::info!(
            request_id = %transport.request_id(),
            entry_point = entry.name,
            "Method call end"
        );
        response
    }
}
