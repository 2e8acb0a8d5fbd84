//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! versioning + http produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, histograms via `metrics`)
//!
//! Consumers:
//!     → stdout (fmt subscriber, filter from RUST_LOG or config)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields, never preformatted strings
//! - Request ID flows through the trace span (tower-http)
//! - Metric updates are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
