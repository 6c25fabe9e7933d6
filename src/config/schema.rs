//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the exporter.
//! All types derive `Deserialize` from config files.
//!
//! Every field carries a default so that a missing key is reported by
//! `validation.rs` under its config name instead of failing deserialization.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Default URL path of the exposition endpoint.
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

/// Default poll cadence in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Root configuration for the exporter.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace groups keyed by group name.
    pub groups: BTreeMap<String, NamespaceGroupSpec>,

    /// Listen address of the exposition endpoint (e.g. "0.0.0.0:9100").
    pub address: String,

    /// URL path override for the exposition endpoint.
    pub metrics_path: Option<String>,

    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Seconds to sleep between two poll cycles.
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
            address: String::new(),
            metrics_path: None,
            log_level: "info".to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl Config {
    /// Resolved exposition path, always starting with `/`.
    pub fn metrics_path(&self) -> String {
        match self.metrics_path.as_deref() {
            None | Some("") => DEFAULT_METRICS_PATH.to_string(),
            Some(path) if path.starts_with('/') => path.to_string(),
            Some(path) => format!("/{}", path),
        }
    }
}

/// One configured group; becomes one metrics namespace.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamespaceGroupSpec {
    /// Replaces the group key as the emitted namespace when non-empty.
    #[serde(rename = "namespace")]
    pub namespace_override: Option<String>,

    /// Metrics extracted from every file of the group.
    pub metrics: BTreeMap<String, MetricSpec>,

    /// Labels applied to every file of the group.
    pub labels: BTreeMap<String, String>,

    /// JSON sources keyed by file name.
    pub files: BTreeMap<String, FileSpec>,
}

impl NamespaceGroupSpec {
    /// Effective namespace: the override when set, else the group key.
    pub fn namespace<'a>(&'a self, group_key: &'a str) -> &'a str {
        match self.namespace_override.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => group_key,
        }
    }
}

/// A single gauge definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricSpec {
    /// Help text of the gauge.
    pub help: String,

    /// Extraction path into the JSON document.
    pub path: String,

    /// Reserved; must be empty.
    #[serde(rename = "type")]
    pub kind: String,
}

/// A JSON source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileSpec {
    /// Path of the JSON document on disk.
    #[serde(rename = "filepath")]
    pub file_path: String,

    /// Labels specific to this file; they win over group labels.
    pub labels: BTreeMap<String, String>,
}

impl FileSpec {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            labels: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }
}
