//! Metrics collection and exposition.
//!
//! # Metrics
//! - `product_requests_total` (counter): requests by operation, status
//! - `product_request_duration_seconds` (histogram): latency by operation
//!
//! Recording is a no-op until a recorder is installed, so handlers record
//! unconditionally and the exporter is opt-in.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(operation: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "product_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "product_request_duration_seconds",
        "operation" => operation
    )
    .record(start.elapsed().as_secs_f64());
}
