//! Metrics collection and exposition.
//!
//! # Metrics
//! - `deck_http_requests_total` (counter): requests by method, route, status
//! - `deck_http_request_duration_seconds` (histogram): latency distribution
//! - `deck_catalog_cards` (gauge): names in the current index
//! - `deck_catalog_loads_total` (counter): load attempts by outcome
//! - `deck_saves_total` (counter): deck saves by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let route = route.to_string();
    let status = status.to_string();
    counter!(
        "deck_http_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "deck_http_request_duration_seconds",
        "method" => method,
        "route" => route,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_catalog_size(cards: usize) {
    gauge!("deck_catalog_cards").set(cards as f64);
}

pub fn record_catalog_load(outcome: &'static str) {
    counter!("deck_catalog_loads_total", "outcome" => outcome).increment(1);
}

pub fn record_deck_save(outcome: &'static str) {
    counter!("deck_saves_total", "outcome" => outcome).increment(1);
}
