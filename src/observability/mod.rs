//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! bridge / converters / server produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (dispatch and conversion counters)
//!
//! Consumers:
//!     → stdout via tracing-subscriber
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
