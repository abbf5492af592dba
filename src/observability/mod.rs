//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, gated by config)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all log lines for correlation
//! - Metrics are cheap (atomic increments); exposition is optional

pub mod logging;
pub mod metrics;
