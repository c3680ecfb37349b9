//! Metrics collection and exposition.
//!
//! # Metrics
//! - `seeder_api_requests_total` (counter): API calls by verb, kind, outcome
//! - `seeder_api_request_duration_seconds` (histogram): API call latency
//! - `seeder_retries_total` (counter): retries by kind
//!
//! Recording is a no-op until an exporter is installed, so library code can
//! call the helpers unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::cluster::types::ResourceKind;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one API call.
pub fn record_api_call(verb: &'static str, kind: ResourceKind, outcome: &'static str, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    metrics::counter!(
        "seeder_api_requests_total",
        "verb" => verb,
        "kind" => kind.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "seeder_api_request_duration_seconds",
        "verb" => verb,
        "kind" => kind.as_str()
    )
    .record(elapsed);
}

/// Record one retry of a transient failure.
pub fn record_retry(kind: ResourceKind) {
    metrics::counter!("seeder_retries_total", "kind" => kind.as_str()).increment(1);
}
