//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use json_gauge_exporter::config::{Config, FileSpec, MetricSpec, NamespaceGroupSpec};

/// Lighthouse-style report with the given performance score.
pub fn report(score: f64) -> String {
    format!(
        r#"{{"categories":{{"performance":{{"score":{}}},"pwa":{{"score":0.3}}}}}}"#,
        score
    )
}

pub fn write_report(dir: &Path, name: &str, score: f64) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, report(score)).unwrap();
    path
}

pub fn metric(path: &str) -> MetricSpec {
    MetricSpec {
        help: "Lighthouse score".into(),
        path: path.into(),
        kind: String::new(),
    }
}

/// Group with label `host` and a `performance` metric reading `file`.
pub fn group(namespace: Option<&str>, host: &str, file: &Path) -> NamespaceGroupSpec {
    let mut group = NamespaceGroupSpec {
        namespace_override: namespace.map(str::to_string),
        ..NamespaceGroupSpec::default()
    };
    group.labels.insert("host".into(), host.into());
    group
        .metrics
        .insert("performance".into(), metric("categories.performance.score"));
    group
        .files
        .insert("home".into(), FileSpec::new(file.to_string_lossy()));
    group
}

pub fn config(address: &str, groups: Vec<(&str, NamespaceGroupSpec)>) -> Config {
    let mut config = Config {
        address: address.into(),
        poll_interval_secs: 1,
        ..Config::default()
    };
    for (key, group) in groups {
        config.groups.insert(key.into(), group);
    }
    config
}

/// Value of the series of `name` carrying label `host`, if present.
pub fn gauge_value(registry: &prometheus::Registry, name: &str, host: &str) -> Option<f64> {
    registry
        .gather()
        .iter()
        .filter(|family| family.get_name() == name)
        .flat_map(|family| family.get_metric().iter())
        .find(|metric| {
            metric
                .get_label()
                .iter()
                .any(|l| l.get_name() == "host" && l.get_value() == host)
        })
        .map(|metric| metric.get_gauge().get_value())
}
