//! HTTP exposition subsystem.
//!
//! # Data Flow
//! ```text
//! Scrape request
//!     → server.rs (Axum router, trace layer)
//!     → metrics handler (gather registry, text encode)
//!     → Send to scraper
//! ```

pub mod server;

pub use server::MetricsServer;
