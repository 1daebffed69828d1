//! Metrics collection and exposition.
//!
//! # Metrics
//! - `facade_upstream_requests_total` (counter): upstream calls by method, status
//! - `facade_upstream_request_duration_seconds` (histogram): upstream latency
//!
//! Recording is a no-op until a recorder is installed, so library users and
//! tests pay nothing when the exporter is disabled.

use metrics_exporter_prometheus::PrometheusBuilder;
use reqwest::StatusCode;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Label value for an upstream outcome; `None` means no response arrived.
pub fn status_label(status: Option<StatusCode>) -> String {
    match status {
        Some(status) => status.as_u16().to_string(),
        None => "unreachable".to_string(),
    }
}

/// Record one upstream round-trip.
pub fn record_upstream_call(method: &'static str, status: Option<StatusCode>, start_time: Instant) {
    metrics::counter!(
        "facade_upstream_requests_total",
        "method" => method,
        "status" => status_label(status)
    )
    .increment(1);
    metrics::histogram!("facade_upstream_request_duration_seconds", "method" => method)
        .record(start_time.elapsed().as_secs_f64());
}
