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
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields (request_id, path, route, handler) on every dispatch log
//! - Metrics are cheap (atomic increments)
//! - Metrics exporter is optional and off by default

pub mod logging;
pub mod metrics;
