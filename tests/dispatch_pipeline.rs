//! Entry-point pipeline tests against a stub backend.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use serde_json::{json, Value};

use notification_gateway::dispatch::{Dispatcher, OperationId, OperationResult};
use notification_gateway::envelope::{DeliveryMode, RawRequest, TransportContext};
use notification_gateway::NotificationController;

mod common;
use common::{Reply, StubBackend};

fn controller(stub: &Arc<StubBackend>) -> NotificationController {
    NotificationController::new(Dispatcher::new(stub.clone()))
}

fn transport(raw: RawRequest) -> TransportContext {
    TransportContext::new("req-test", raw)
}

fn notification_body() -> Value {
    json!({
        "request": {
            "notifications": [{
                "mode": "email",
                "deliveryType": "message",
                "ids": ["user@example.com"],
                "template": {"data": "Hello"}
            }]
        }
    })
}

/// Run every entry point once with `raw` as both ambient and explicit request.
async fn run_all(controller: &NotificationController, raw: RawRequest) -> Vec<OperationResult> {
    let t = transport(raw);
    vec![
        controller.send_notification(&t).await,
        controller.send_sync_notification(&t).await,
        controller.verify_otp(&t).await,
        controller.send_v2_notification(&t).await,
        controller.read_feed_notification("u1", t.request(), &t).await,
        controller.update_notification_feed(&t).await,
    ]
}

#[tokio::test]
async fn test_entry_points_dispatch_table_operations() {
    let stub = StubBackend::echo();
    let controller = controller(&stub);
    let t = transport(RawRequest::json(&notification_body()));

    let cases: Vec<(OperationId, OperationResult)> = vec![
        (OperationId::SendNotification, controller.send_notification(&t).await),
        (OperationId::SendNotification, controller.send_sync_notification(&t).await),
        (OperationId::VerifyOtp, controller.verify_otp(&t).await),
        (OperationId::CreateNotificationV2, controller.send_v2_notification(&t).await),
        (
            OperationId::ReadFeed,
            controller.read_feed_notification("u1", t.request(), &t).await,
        ),
        (OperationId::UpdateFeed, controller.update_notification_feed(&t).await),
    ];

    for (expected, result) in cases {
        assert_eq!(result.status, StatusCode::OK);
        assert_eq!(result.body["result"]["operation"], expected.as_str());
    }
    assert_eq!(stub.calls(), 6);
}

#[tokio::test]
async fn test_sync_mode_only_on_sync_and_v2() {
    let stub = StubBackend::echo();
    let controller = controller(&stub);
    let t = transport(RawRequest::json(&notification_body()));

    let mut modes = Vec::new();
    controller.send_notification(&t).await;
    modes.push(stub.last().delivery_mode());
    controller.send_sync_notification(&t).await;
    modes.push(stub.last().delivery_mode());
    controller.verify_otp(&t).await;
    modes.push(stub.last().delivery_mode());
    controller.send_v2_notification(&t).await;
    modes.push(stub.last().delivery_mode());
    controller.read_feed_notification("u1", t.request(), &t).await;
    modes.push(stub.last().delivery_mode());
    controller.update_notification_feed(&t).await;
    modes.push(stub.last().delivery_mode());

    use DeliveryMode::{Async, Sync};
    assert_eq!(modes, vec![Async, Sync, Async, Sync, Async, Async]);
}

#[tokio::test]
async fn test_non_sync_entry_points_never_set_header() {
    let stub = StubBackend::echo();
    let controller = controller(&stub);
    let raw = RawRequest::json(&json!({}))
        .with_header("deliverymode", HeaderValue::from_static("sync"));
    let t = transport(raw);

    controller.send_notification(&t).await;
    assert!(stub.last().headers.get("deliveryMode").is_none());
    controller.verify_otp(&t).await;
    assert!(stub.last().headers.get("deliveryMode").is_none());
    controller.update_notification_feed(&t).await;
    assert!(stub.last().headers.get("deliveryMode").is_none());
}

#[tokio::test]
async fn test_read_feed_injects_user_id() {
    let stub = StubBackend::echo();
    let controller = controller(&stub);

    let without = RawRequest::json(&json!({"limit": 10}));
    let t = transport(without.clone());
    controller.read_feed_notification("u123", &without, &t).await;
    assert_eq!(stub.last().parameter("userId"), Some(&json!("u123")));

    let with = RawRequest::json(&json!({"userId": "someone-else", "limit": 10}));
    let t = transport(with.clone());
    let result = controller.read_feed_notification("u123", &with, &t).await;
    assert_eq!(stub.last().parameter("userId"), Some(&json!("u123")));
    assert_eq!(stub.last().parameter("limit"), Some(&json!(10)));
    assert_eq!(result.body["result"]["params"]["userId"], "u123");
}

#[tokio::test]
async fn test_read_feed_reads_explicit_request() {
    let stub = StubBackend::echo();
    let controller = controller(&stub);
    let ambient = RawRequest::json(&json!({"from": "ambient"}));
    let explicit = RawRequest::json(&json!({"from": "explicit"}));
    let t = transport(ambient);

    controller.read_feed_notification("u9", &explicit, &t).await;

    assert_eq!(stub.last().parameter("from"), Some(&json!("explicit")));
}

#[tokio::test]
async fn test_malformed_requests_never_reach_backend() {
    let stub = StubBackend::echo();
    let controller = controller(&stub);

    for body in ["[1, 2, 3]", "\"just a string\"", "{\"request\": ", "17"] {
        let results = run_all(&controller, RawRequest::new(HeaderMap::new(), body)).await;
        for result in results {
            assert_eq!(result.status, StatusCode::BAD_REQUEST, "body {body}");
            assert_eq!(result.body["responseCode"], "CLIENT_ERROR");
            assert_eq!(result.body["params"]["status"], "failed");
        }
    }

    let form = RawRequest::new(HeaderMap::new(), "a=b").with_header(
        "content-type",
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    for result in run_all(&controller, form).await {
        assert_eq!(result.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_failure_result_names_entry_operation() {
    let stub = StubBackend::echo();
    let controller = controller(&stub);
    let t = transport(RawRequest::new(HeaderMap::new(), "[]"));

    let result = controller.send_v2_notification(&t).await;

    assert_eq!(result.body["id"], "api.notification.v2.send");
    assert_eq!(result.body["params"]["msgid"], "req-test");
    assert_eq!(result.body["params"]["err"], "INVALID_BODY_SHAPE");
}

#[tokio::test]
async fn test_context_request_id_falls_back_to_transport() {
    let stub = StubBackend::echo();
    let controller = controller(&stub);

    let t = transport(RawRequest::json(&notification_body()));
    controller.send_notification(&t).await;
    assert_eq!(stub.last().context.request_id(), Some("req-test"));

    let raw = RawRequest::json(&notification_body())
        .with_header("x-request-id", HeaderValue::from_static("client-7"));
    controller.send_notification(&transport(raw)).await;
    assert_eq!(stub.last().context.request_id(), Some("client-7"));
}

#[tokio::test]
async fn test_empty_body_dispatches_with_no_parameters() {
    let stub = StubBackend::echo();
    let controller = controller(&stub);
    let t = transport(RawRequest::default());

    let result = controller.verify_otp(&t).await;

    assert_eq!(result.status, StatusCode::OK);
    assert!(stub.last().parameters.is_empty());
}

#[tokio::test]
async fn test_backend_failure_passes_through_unchanged() {
    let failure = OperationResult::new(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({"error": {"code": "SMS_PROVIDER_DOWN"}, "retryAfter": 30}),
    );
    let stub = StubBackend::with(Reply::Fixed(failure.clone()), Duration::ZERO);
    let controller = controller(&stub);
    let t = transport(RawRequest::json(&notification_body()));

    let result = controller.send_notification(&t).await;

    assert_eq!(result, failure);
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_concurrent_requests_do_not_bleed() {
    const N: usize = 50;
    let delay = Duration::from_millis(100);
    let stub = StubBackend::with(Reply::Echo, delay);
    let controller = Arc::new(controller(&stub));

    let start = Instant::now();
    let mut tasks = Vec::new();
    for i in 0..N {
        let controller = controller.clone();
        tasks.push(tokio::spawn(async move {
            let raw = RawRequest::json(&json!({"request": {"seq": i}}));
            let t = TransportContext::new(format!("req-{i}"), raw);
            let future = if i % 2 == 0 {
                controller.send_notification(&t)
            } else {
                controller.read_feed_notification(&format!("user-{i}"), t.request(), &t)
            };
            (i, future.await)
        }));
    }

    for task in tasks {
        let (i, result) = task.await.unwrap();
        assert_eq!(result.status, StatusCode::OK);
        assert_eq!(result.body["params"]["msgid"], format!("req-{i}"));
        assert_eq!(result.body["result"]["params"]["request"]["seq"], i);
        if i % 2 == 1 {
            assert_eq!(result.body["result"]["params"]["userId"], format!("user-{i}"));
        } else {
            assert!(result.body["result"]["params"].get("userId").is_none());
        }
    }

    assert_eq!(stub.calls(), N);
    // All requests were in flight together rather than one after another.
    assert!(start.elapsed() < delay * (N as u32) / 4);
}

#[tokio::test]
async fn test_dispatch_returns_before_backend_completes() {
    let stub = StubBackend::with(Reply::Echo, Duration::from_millis(200));
    let controller = controller(&stub);
    let t = transport(RawRequest::json(&json!({})));

    let start = Instant::now();
    let future = controller.update_notification_feed(&t);
    assert!(start.elapsed() < Duration::from_millis(100));
    assert_eq!(stub.calls(), 1);

    let result = future.await;
    assert_eq!(result.status, StatusCode::OK);
}
