//! JSON Gauge Exporter Library
//!
//! Periodically reads JSON documents from disk, extracts numeric fields by
//! path and republishes them as labeled Prometheus gauges.
//!
//! # Architecture Overview
//!
//! ```text
//!   config file ──▶ config ──▶ topology ──▶ poller ──(every interval)──┐
//!                  (load +     (namespaces,  (read file, extract,       │
//!                   validate)   file groups,  set gauge)                │
//!                               gauges)           │                     │
//!                                   │             ▼                     │
//!                                   └────▶ prometheus::Registry ◀───────┘
//!                                                 │
//!                                                 ▼
//!                                   http (GET <metrics_path>) ──▶ scraper
//! ```

// Core subsystems
pub mod config;
pub mod extract;
pub mod poller;
pub mod topology;

// Serving
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::Config;
pub use http::MetricsServer;
pub use lifecycle::{Exporter, Shutdown, StartupError};
pub use poller::Poller;
pub use topology::Topology;
