//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build topology → Bind listener
//!     → Spawn poller → Serve scrapes
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Poller exits, server drains → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: config, topology and bind errors are fatal
//! - Listener binds before the poller starts so a bad address exits early

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{Exporter, StartupError};
