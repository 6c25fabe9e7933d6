//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check required values are present and non-empty
//! - Check every group has metrics and files
//! - Check label key sets are uniform within a group
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Config → Result<(), Vec<ValidationError>>
//! - Errors name the offending field by its config key path
//! - Runs before config is accepted into the system

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::config::schema::{Config, NamespaceGroupSpec};
use crate::topology::merge_labels;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted config key path, e.g. `groups.web.metrics.score.help`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a decoded configuration.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.address.trim().is_empty() {
        errors.push(ValidationError::new("address", "is required"));
    }

    if config.poll_interval_secs == 0 {
        errors.push(ValidationError::new("poll_interval_secs", "must be greater than zero"));
    }

    if let Err(message) = check_route_path(&config.metrics_path()) {
        errors.push(ValidationError::new("metrics_path", message));
    }

    if config.groups.is_empty() {
        errors.push(ValidationError::new("groups", "must contain at least one entry"));
    }

    for (key, group) in &config.groups {
        validate_group(&format!("groups.{}", key), group, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The exposition path must be a literal route: no captures, wildcards, or
/// empty segments.
fn check_route_path(path: &str) -> Result<(), String> {
    let segments = path.strip_prefix('/').unwrap_or(path);
    if segments.is_empty() {
        return Ok(());
    }

    if path.contains(['{', '}', '*']) {
        return Err(format!("{:?} must not contain '{{', '}}' or '*'", path));
    }
    for segment in segments.split('/') {
        if segment.is_empty() {
            return Err(format!("{:?} contains an empty segment", path));
        }
        if segment.starts_with(':') {
            return Err(format!("{:?} must not contain ':' captures", path));
        }
    }
    Ok(())
}

fn validate_group(prefix: &str, group: &NamespaceGroupSpec, errors: &mut Vec<ValidationError>) {
    if group.metrics.is_empty() {
        errors.push(ValidationError::new(
            format!("{}.metrics", prefix),
            "must contain at least one entry",
        ));
    }

    for (key, metric) in &group.metrics {
        let field = format!("{}.metrics.{}", prefix, key);
        if metric.help.trim().is_empty() {
            errors.push(ValidationError::new(format!("{}.help", field), "is required"));
        }
        if metric.path.trim().is_empty() {
            errors.push(ValidationError::new(format!("{}.path", field), "is required"));
        }
        if !metric.kind.is_empty() {
            errors.push(ValidationError::new(
                format!("{}.type", field),
                format!("must be empty, got {:?} (metric types are not supported)", metric.kind),
            ));
        }
    }

    let label_keys = |labels: &BTreeMap<String, String>| -> BTreeSet<String> {
        merge_labels(labels, &group.labels).into_keys().collect()
    };
    let (first_key, expected) = match group.files.iter().next() {
        Some((key, file)) => (key, label_keys(&file.labels)),
        None => {
            errors.push(ValidationError::new(
                format!("{}.files", prefix),
                "must contain at least one entry",
            ));
            return;
        }
    };

    for (key, file) in &group.files {
        let field = format!("{}.files.{}", prefix, key);
        if file.file_path.trim().is_empty() {
            errors.push(ValidationError::new(format!("{}.filepath", field), "is required"));
        }

        let keys = label_keys(&file.labels);
        if keys != expected {
            errors.push(ValidationError::new(
                format!("{}.labels", field),
                format!(
                    "label keys {:?} differ from {:?} used by file {:?}; all files of a group must share one label key set",
                    keys, expected, first_key
                ),
            ));
        }
    }
}
