//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML/JSON/TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Config (validated, immutable)
//!     → consumed once by the topology builder
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - Any load or validation failure is fatal
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with_files, ConfigError};
pub use schema::{Config, FileSpec, MetricSpec, NamespaceGroupSpec};
pub use validation::{validate_config, ValidationError};
