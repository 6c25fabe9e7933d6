//! Topology construction from configuration.
//!
//! # Responsibilities
//! - Resolve each group's effective namespace name
//! - Merge group labels into every file's labels
//! - Derive the namespace label key schema
//! - Register one gauge vector per (namespace, metric) pair
//!
//! # Design Decisions
//! - Registration conflicts are logged and skipped; startup continues
//! - The label schema comes from the first file group; validation has
//!   already ensured every file group of the group shares it

use prometheus::{GaugeVec, Opts, Registry};
use thiserror::Error;

use crate::config::{Config, NamespaceGroupSpec};
use crate::topology::{merge_labels, FileGroup, GaugeBinding, Namespace, Topology};

/// Errors that abort topology construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    /// A group reached the builder without any file entries.
    #[error("namespace {namespace:?} has no files; cannot derive its label schema")]
    NoFiles { namespace: String },
}

impl Topology {
    /// Build the topology for `config`, registering gauges with `registry`.
    pub fn build(config: &Config, registry: &Registry) -> Result<Self, TopologyError> {
        let mut namespaces = Vec::with_capacity(config.groups.len());

        for (group_key, group) in &config.groups {
            namespaces.push(build_namespace(group_key, group, registry)?);
        }

        let topology = Self { namespaces };
        tracing::info!(
            namespaces = topology.namespaces.len(),
            gauges = topology.binding_count(),
            "Topology built"
        );
        Ok(topology)
    }
}

fn build_namespace(
    group_key: &str,
    group: &NamespaceGroupSpec,
    registry: &Registry,
) -> Result<Namespace, TopologyError> {
    let name = group.namespace(group_key).to_string();

    let file_groups: Vec<FileGroup> = group
        .files
        .iter()
        .map(|(key, file)| FileGroup {
            key: key.clone(),
            file_path: file.file_path.clone(),
            labels: merge_labels(&file.labels, &group.labels),
        })
        .collect();

    let label_keys: Vec<String> = match file_groups.first() {
        Some(first) => first.labels.keys().cloned().collect(),
        None => return Err(TopologyError::NoFiles { namespace: name }),
    };
    let label_refs: Vec<&str> = label_keys.iter().map(String::as_str).collect();

    let mut gauges = Vec::with_capacity(group.metrics.len());
    for (metric_key, metric) in &group.metrics {
        let fq_name = format!("{}_{}", name, metric_key);
        let opts = Opts::new(metric_key.as_str(), metric.help.as_str()).namespace(name.as_str());

        let gauge = match GaugeVec::new(opts, &label_refs) {
            Ok(gauge) => gauge,
            Err(e) => {
                tracing::error!(name = %fq_name, error = %e, "Invalid gauge definition, skipping");
                continue;
            }
        };

        if let Err(e) = registry.register(Box::new(gauge.clone())) {
            tracing::error!(name = %fq_name, error = %e, "Registering gauge failed, skipping");
            continue;
        }
        tracing::info!(name = %fq_name, labels = ?label_keys, "Registered gauge");

        gauges.push(GaugeBinding {
            metric_key: metric_key.clone(),
            path: metric.path.clone(),
            gauge,
        });
    }

    Ok(Namespace {
        name,
        file_groups,
        gauges,
        label_keys,
    })
}
