//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hitwalker_requests_total` (counter): dispatched requests by handler, status
//! - `hitwalker_request_duration_seconds` (histogram): handler latency
//! - `hitwalker_route_not_found_total` (counter): paths no route matched
//! - `hitwalker_config_reloads_total` (counter): reloads by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_dispatch(handler: &str, status: u16, start: Instant) {
    counter!(
        "hitwalker_requests_total",
        "handler" => handler.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("hitwalker_request_duration_seconds", "handler" => handler.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_not_found() {
    counter!("hitwalker_route_not_found_total").increment(1);
}

pub fn record_reload(success: bool) {
    let outcome = if success { "applied" } else { "rejected" };
    counter!("hitwalker_config_reloads_total", "outcome" => outcome).increment(1);
}
