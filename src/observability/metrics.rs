//! Metrics collection and exposition.
//!
//! # Metrics
//! - `version_router_requests_total` (counter): requests by outcome and
//!   matched route
//! - `version_router_dispatch_duration_seconds` (histogram): handler latency
//!   by matched route
//!
//! # Design Decisions
//! - Labels come from the route table, never from the client's header, so
//!   the series count is bounded by the number of routes
//! - Rejections are labelled with `VersionError::kind`, route `none`
//! - Exporter is optional; without it the macros record into a no-op recorder

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "version_router_requests_total";
pub const DISPATCH_DURATION: &str = "version_router_dispatch_duration_seconds";

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a request that was rejected before reaching a handler.
pub fn record_rejection(kind: &'static str) {
    counter!(REQUESTS_TOTAL, "outcome" => kind, "route" => "none").increment(1);
}

/// Record a request handed to the handler of `route` (a canonical constraint).
pub fn record_dispatch(route: &str, start_time: Instant) {
    let route = route.to_string();
    counter!(REQUESTS_TOTAL, "outcome" => "dispatched", "route" => route.clone()).increment(1);
    histogram!(DISPATCH_DURATION, "route" => route).record(start_time.elapsed().as_secs_f64());
}
