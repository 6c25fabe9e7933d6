//! End-to-end behavior of topology building and polling.

use std::time::Duration;

use json_gauge_exporter::observability::metrics::{encode, ExporterMetrics};
use json_gauge_exporter::{Poller, Topology};
use prometheus::Registry;

mod common;

fn poller(config: &json_gauge_exporter::Config, registry: &Registry) -> Poller {
    let metrics = ExporterMetrics::register(registry).unwrap();
    let topology = Topology::build(config, registry).unwrap();
    Poller::new(topology, Duration::from_secs(10), metrics)
}

#[test]
fn test_lighthouse_score_exported() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.json");
    std::fs::write(&file, r#"{"categories":{"performance":{"score":0.87}}}"#).unwrap();

    let config = common::config(
        "127.0.0.1:0",
        vec![("lightheus", common::group(None, "a.com", &file))],
    );
    let registry = Registry::new();
    poller(&config, &registry).poll_once();

    assert_eq!(
        common::gauge_value(&registry, "lightheus_performance", "a.com"),
        Some(0.87)
    );
    let text = encode(&registry).unwrap();
    assert!(text.contains("lightheus_performance{host=\"a.com\"} 0.87"));
}

#[test]
fn test_deleted_file_zeroes_only_its_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let a = common::write_report(dir.path(), "a.json", 0.87);
    let b = common::write_report(dir.path(), "b.json", 0.65);

    let config = common::config(
        "127.0.0.1:0",
        vec![
            ("lightheus", common::group(None, "a.com", &a)),
            ("other", common::group(None, "b.com", &b)),
        ],
    );
    let registry = Registry::new();
    let poller = poller(&config, &registry);

    poller.poll_once();
    assert_eq!(common::gauge_value(&registry, "lightheus_performance", "a.com"), Some(0.87));

    std::fs::remove_file(&a).unwrap();
    let report = poller.poll_once();

    assert_eq!(report.failed, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(common::gauge_value(&registry, "lightheus_performance", "a.com"), Some(0.0));
    assert_eq!(common::gauge_value(&registry, "other_performance", "b.com"), Some(0.65));
}

#[test]
fn test_shared_namespace_registers_once() {
    let dir = tempfile::tempdir().unwrap();
    let a = common::write_report(dir.path(), "a.json", 0.87);
    let b = common::write_report(dir.path(), "b.json", 0.65);

    let config = common::config(
        "127.0.0.1:0",
        vec![
            ("first", common::group(Some("shared"), "a.com", &a)),
            ("second", common::group(Some("shared"), "b.com", &b)),
        ],
    );
    let registry = Registry::new();
    let poller = poller(&config, &registry);

    assert_eq!(poller.topology().metric_names(), vec!["shared_performance".to_string()]);
    poller.poll_once();

    let families = registry.gather();
    let shared: Vec<_> = families
        .iter()
        .filter(|f| f.get_name() == "shared_performance")
        .collect();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].get_metric().len(), 1);
    assert_eq!(common::gauge_value(&registry, "shared_performance", "a.com"), Some(0.87));
}

#[test]
fn test_file_labels_override_group_labels() {
    let dir = tempfile::tempdir().unwrap();
    let a = common::write_report(dir.path(), "a.json", 0.87);
    let b = common::write_report(dir.path(), "b.json", 0.65);

    let mut group = common::group(None, "a.com", &a);
    group.files.insert(
        "shop".into(),
        json_gauge_exporter::config::FileSpec::new(b.to_string_lossy()).with_label("host", "shop.a.com"),
    );
    let config = common::config("127.0.0.1:0", vec![("lightheus", group)]);
    let registry = Registry::new();
    poller(&config, &registry).poll_once();

    assert_eq!(common::gauge_value(&registry, "lightheus_performance", "a.com"), Some(0.87));
    assert_eq!(common::gauge_value(&registry, "lightheus_performance", "shop.a.com"), Some(0.65));
}

#[test]
fn test_broken_path_stays_scrapeable_at_zero() {
    let dir = tempfile::tempdir().unwrap();
    let a = common::write_report(dir.path(), "a.json", 0.87);

    let mut group = common::group(None, "a.com", &a);
    group
        .metrics
        .insert("seo".into(), common::metric("categories.seo.score"));
    let config = common::config("127.0.0.1:0", vec![("lightheus", group)]);
    let registry = Registry::new();
    let poller = poller(&config, &registry);

    for _ in 0..3 {
        poller.poll_once();
    }

    assert_eq!(common::gauge_value(&registry, "lightheus_seo", "a.com"), Some(0.0));
    assert_eq!(common::gauge_value(&registry, "lightheus_performance", "a.com"), Some(0.87));
}
