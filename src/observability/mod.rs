//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http + upstream produce:
//!     → logging.rs (structured tracing events, one per failed lookup)
//!     → metrics.rs (lookup outcome counters and latency histograms)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG)
//!     → GET /metrics (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
