//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relayed calls by route, method, status
//! - `relay_request_duration_seconds` (histogram): end-to-end relay latency by route
//!
//! Transport failures carry `status="error"`. Without an installed recorder
//! (metrics disabled, tests) every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one relayed call. `status` is `None` when no response was produced.
pub fn record_relay(route: &str, method: &str, status: Option<u16>, start: Instant) {
    let status = status.map_or_else(|| "error".to_string(), |s| s.to_string());

    metrics::counter!(
        "relay_requests_total",
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => status
    )
    .increment(1);

    metrics::histogram!(
        "relay_request_duration_seconds",
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
