//! Metrics collection and exposition.
//!
//! # Metrics
//! - `notification_requests_total` (counter): requests by entry point, status
//! - `notification_request_duration_seconds` (histogram): latency by entry point

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed request. A no-op when no recorder is installed.
pub fn record_request(entry_point: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(
        "notification_requests_total",
        "entry_point" => entry_point,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!(
        "notification_request_duration_seconds",
        "entry_point" => entry_point
    )
    .record(start.elapsed().as_secs_f64());
}
