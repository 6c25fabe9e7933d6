//! Runtime metric topology.
//!
//! # Data Flow
//! ```text
//! Config (validated)
//!     → builder.rs (resolve namespaces, merge labels, register gauges)
//!     → Topology (immutable for the process lifetime)
//!     → handed to the poller by value
//!
//! Topology
//!     └── Namespace (one per configured group)
//!           ├── FileGroup   (file path + merged labels)
//!           └── GaugeBinding (registered gauge vector + extraction path)
//! ```
//!
//! # Design Decisions
//! - The registry is injected, never process-global
//! - Duplicate registrations are skipped, not fatal
//! - Label key schema is fixed per namespace at build time

pub mod builder;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use prometheus::GaugeVec;

pub use builder::TopologyError;

/// Overlay group labels onto file labels. File labels win on conflict.
pub fn merge_labels(
    file_labels: &BTreeMap<String, String>,
    group_labels: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = file_labels.clone();
    for (key, value) in group_labels {
        merged.entry(key.clone()).or_insert_with(|| value.clone());
    }
    merged
}

/// All namespaces built from one configuration.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    pub namespaces: Vec<Namespace>,
}

impl Topology {
    /// Fully-qualified names of every bound gauge, in build order.
    pub fn metric_names(&self) -> Vec<String> {
        self.namespaces
            .iter()
            .flat_map(|ns| ns.gauges.iter().map(move |g| ns.metric_name(&g.metric_key)))
            .collect()
    }

    /// Number of gauge bindings across all namespaces.
    pub fn binding_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.gauges.len()).sum()
    }
}

/// A metric namespace and everything polled under it.
#[derive(Debug, Clone)]
pub struct Namespace {
    pub name: String,
    pub file_groups: Vec<FileGroup>,
    pub gauges: Vec<GaugeBinding>,
    /// Label keys every gauge vector of this namespace was registered with.
    pub label_keys: Vec<String>,
}

impl Namespace {
    pub fn metric_name(&self, metric_key: &str) -> String {
        format!("{}_{}", self.name, metric_key)
    }
}

/// One JSON source and the label values its series carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub key: String,
    pub file_path: String,
    pub labels: BTreeMap<String, String>,
}

impl FileGroup {
    /// Labels in the shape the gauge vector expects.
    pub fn label_map(&self) -> HashMap<&str, &str> {
        self.labels
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

/// A registered gauge vector and the path its value is read from.
#[derive(Clone)]
pub struct GaugeBinding {
    pub metric_key: String,
    pub path: String,
    pub gauge: GaugeVec,
}

impl fmt::Debug for GaugeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaugeBinding")
            .field("metric_key", &self.metric_key)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
