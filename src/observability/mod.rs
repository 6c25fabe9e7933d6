//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (exporter self metrics + text encoding)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → exposition endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging with key/value fields
//! - Self metrics share the registry of the exported gauges
//! - Metric updates are cheap (atomic operations)

pub mod logging;
pub mod metrics;
