//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_dispatch_total` (counter): calls by convention and target kind
//! - `bridge_conversions_total` (counter): conversions by direction and part
//!
//! Without an installed recorder every update is a no-op.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);

    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a call entering the bridge.
pub fn record_dispatch(convention: &'static str, target: &'static str) {
    counter!("bridge_dispatch_total", "convention" => convention, "target" => target).increment(1);
}

/// Record a completed model conversion.
pub fn record_conversion(direction: &'static str, part: &'static str) {
    counter!("bridge_conversions_total", "direction" => direction, "part" => part).increment(1);
}
