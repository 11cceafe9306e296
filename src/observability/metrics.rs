//! Lookup metrics.
//!
//! # Metrics
//! - `adserver_resolutions_total` (counter): lookups by outcome
//! - `adserver_resolution_duration_seconds` (histogram): lookup latency by outcome
//! - `adserver_short_circuit_total` (counter): requests answered without a lookup
//!
//! Recording goes through the `metrics` facade and is a no-op until the
//! binary installs the Prometheus recorder.

use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder.
pub fn install() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record a finished lookup.
pub fn record_resolution(outcome: &'static str, start: Instant) {
    counter!("adserver_resolutions_total", "outcome" => outcome).increment(1);
    histogram!("adserver_resolution_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record a request that had no identifier to look up.
pub fn record_short_circuit() {
    counter!("adserver_short_circuit_total").increment(1);
}
