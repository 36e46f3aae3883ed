//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rates_requests_total` (counter): requests by status code
//! - `rates_request_duration_seconds` (histogram): latency distribution
//! - `rates_validation_failures_total` (counter): rejected input by side and kind
//! - `rates_regions_loaded` / `rates_location_codes_loaded` (gauges): reference data size
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(status: u16, start_time: Instant) {
    ::metrics::counter!("rates_requests_total", "status" => status.to_string()).increment(1);
    ::metrics::histogram!("rates_request_duration_seconds")
        .record(start_time.elapsed().as_secs_f64());
}

pub fn record_validation_failure(side: &'static str, kind: &'static str) {
    ::metrics::counter!("rates_validation_failures_total", "side" => side, "kind" => kind)
        .increment(1);
}

pub fn record_reference_data(regions: usize, location_codes: usize) {
    ::metrics::gauge!("rates_regions_loaded").set(regions as f64);
    ::metrics::gauge!("rates_location_codes_loaded").set(location_codes as f64);
}
