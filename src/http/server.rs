//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the notification entry points
//! - Wire up middleware (request ID, tracing, body limit, timeout)
//! - Record per-entry-point metrics
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Path, Request, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::backend::{self, BackendError, OperationHandler};
use crate::config::GatewayConfig;
use crate::controller::NotificationController;
use crate::dispatch::entry::{
    EntryPoint, READ_FEED_NOTIFICATION, SEND_NOTIFICATION, SEND_SYNC_NOTIFICATION,
    SEND_V2_NOTIFICATION, UPDATE_NOTIFICATION_FEED, VERIFY_OTP,
};
use crate::dispatch::ResultFuture;
use crate::envelope::TransportContext;
use crate::http::request::{extract_transport, X_REQUEST_ID};
use crate::lifecycle::wait_for_shutdown;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<NotificationController>,
    pub max_body_size: usize,
}

/// HTTP server for the notification gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server dispatching to `handler`.
    pub fn new(config: GatewayConfig, handler: Arc<dyn OperationHandler>) -> Self {
        let controller = NotificationController::new(crate::dispatch::Dispatcher::new(handler));
        let state = AppState {
            controller: Arc::new(controller),
            max_body_size: config.security.max_body_size,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Create a server with the backend selected in `config`.
    pub fn from_config(config: GatewayConfig) -> Result<Self, BackendError> {
        let handler = backend::from_config(&config.backend)?;
        Ok(Self::new(config, handler))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/v1/notification/send", post(send_notification))
            .route("/v1/notification/send/sync", post(send_sync_notification))
            .route("/v1/notification/otp/verify", post(verify_otp))
            .route("/v2/notification/send", post(send_v2_notification))
            .route(
                "/v1/notification/feed/read/{user_id}",
                get(read_feed_notification),
            )
            .route("/v1/notification/feed/update", patch(update_notification_feed))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Router with all layers applied, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend = ?self.config.backend.mode,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn send_notification(State(state): State<AppState>, request: Request) -> Response {
    serve(&state, &SEND_NOTIFICATION, request, Vec::new(), |c, t| {
        c.send_notification(t)
    })
    .await
}

async fn send_sync_notification(State(state): State<AppState>, request: Request) -> Response {
    serve(&state, &SEND_SYNC_NOTIFICATION, request, Vec::new(), |c, t| {
        c.send_sync_notification(t)
    })
    .await
}

async fn verify_otp(State(state): State<AppState>, request: Request) -> Response {
    serve(&state, &VERIFY_OTP, request, Vec::new(), |c, t| c.verify_otp(t)).await
}

async fn send_v2_notification(State(state): State<AppState>, request: Request) -> Response {
    serve(&state, &SEND_V2_NOTIFICATION, request, Vec::new(), |c, t| {
        c.send_v2_notification(t)
    })
    .await
}

async fn read_feed_notification(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    request: Request,
) -> Response {
    let path = vec![("userId".to_string(), user_id)];
    serve(&state, &READ_FEED_NOTIFICATION, request, path, |c, t| {
        let user_id = t.request().path_param("userId").unwrap_or_default();
        c.read_feed_notification(user_id, t.request(), t)
    })
    .await
}

async fn update_notification_feed(State(state): State<AppState>, request: Request) -> Response {
    serve(&state, &UPDATE_NOTIFICATION_FEED, request, Vec::new(), |c, t| {
        c.update_notification_feed(t)
    })
    .await
}

/// Extract the transport context, run the entry point, render the result.
async fn serve<F>(
    state: &AppState,
    entry: &EntryPoint,
    request: Request,
    path_params: Vec<(String, String)>,
    call: F,
) -> Response
where
    F: FnOnce(&NotificationController, &TransportContext) -> ResultFuture,
{
    let start = Instant::now();
    let transport = match extract_transport(request, path_params, state.max_body_size).await {
        Ok(transport) => transport,
        Err(response) => {
            metrics::record_request(entry.name, response.status().as_u16(), start);
            return response;
        }
    };

    let result = call(&state.controller, &transport).await;

    tracing::debug!(
        request_id = %transport.request_id(),
        entry_point = entry.name,
        status = %result.status,
        "Operation completed"
    );
    metrics::record_request(entry.name, result.status.as_u16(), start);

    let mut response = result.into_response();
    if let Ok(value) = HeaderValue::from_str(transport.request_id()) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}
