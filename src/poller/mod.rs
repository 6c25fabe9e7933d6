//! Periodic extraction loop.
//!
//! # Responsibilities
//! - Re-read every file group's document each cycle
//! - Extract each bound gauge's value and set the labeled series
//! - Degrade missing or malformed values to `0.0` with a diagnostic
//!
//! # Design Decisions
//! - One sequential pass per cycle; no per-file parallelism
//! - Sleep starts after the pass completes (period = work + interval)
//! - Failures are contained per file group and per binding; nothing
//!   escapes the loop

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tokio::time;

use crate::extract::{self, ExtractError};
use crate::observability::metrics::ExporterMetrics;
use crate::topology::{FileGroup, GaugeBinding, Namespace, Topology};

/// Outcome counts of one poll cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Bindings set from an extracted number.
    pub updated: usize,
    /// Bindings set to zero after a failure.
    pub failed: usize,
}

/// Drives gauge updates from the topology.
pub struct Poller {
    topology: Topology,
    interval: Duration,
    metrics: ExporterMetrics,
}

impl Poller {
    pub fn new(topology: Topology, interval: Duration, metrics: ExporterMetrics) -> Self {
        Self {
            topology,
            interval,
            metrics,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Poll until the shutdown signal fires.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            namespaces = self.topology.namespaces.len(),
            "Poller starting"
        );

        loop {
            let report = self.poll_once();
            tracing::debug!(updated = report.updated, failed = report.failed, "Poll cycle complete");

            tokio::select! {
                _ = time::sleep(self.interval) => {}
                _ = shutdown.recv() => {
                    tracing::info!("Poller received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Run one full pass over every namespace, file group and binding.
    pub fn poll_once(&self) -> CycleReport {
        let started = Instant::now();
        let mut report = CycleReport::default();

        for namespace in &self.topology.namespaces {
            for group in &namespace.file_groups {
                self.poll_file_group(namespace, group, &mut report);
            }
        }

        self.metrics.poll_cycles.inc();
        self.metrics
            .last_poll_duration
            .set(started.elapsed().as_secs_f64());
        report
    }

    fn poll_file_group(&self, namespace: &Namespace, group: &FileGroup, report: &mut CycleReport) {
        let labels = group.label_map();

        let document = match read_document(&group.file_path) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(
                    namespace = %namespace.name,
                    group = %group.key,
                    file = %group.file_path,
                    error = %e,
                    "Reading document failed, zeroing its gauges"
                );
                for binding in &namespace.gauges {
                    self.set_gauge(namespace, binding, &labels, 0.0);
                    self.metrics.record_failure(&namespace.name);
                    report.failed += 1;
                }
                return;
            }
        };

        for binding in &namespace.gauges {
            match extract::query(&document, &binding.path) {
                Ok(value) => {
                    tracing::debug!(
                        gauge = %namespace.metric_name(&binding.metric_key),
                        group = %group.key,
                        file = %group.file_path,
                        path = %binding.path,
                        value,
                        labels = ?group.labels,
                        "Updating gauge"
                    );
                    self.set_gauge(namespace, binding, &labels, value);
                    report.updated += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        gauge = %namespace.metric_name(&binding.metric_key),
                        group = %group.key,
                        file = %group.file_path,
                        path = %binding.path,
                        error = %e,
                        "Extraction failed, setting gauge to zero"
                    );
                    self.set_gauge(namespace, binding, &labels, 0.0);
                    self.metrics.record_failure(&namespace.name);
                    report.failed += 1;
                }
            }
        }
    }

    fn set_gauge(&self, namespace: &Namespace, binding: &GaugeBinding, labels: &HashMap<&str, &str>, value: f64) {
        match binding.gauge.get_metric_with(labels) {
            Ok(gauge) => gauge.set(value),
            Err(e) => tracing::error!(
                gauge = %namespace.metric_name(&binding.metric_key),
                labels = ?labels,
                error = %e,
                "Label set does not match gauge schema"
            ),
        }
    }
}

/// Errors reading a file group's document.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ExtractError),
}

fn read_document(path: &str) -> Result<serde_json::Value, ReadError> {
    let bytes = std::fs::read(path)?;
    Ok(extract::parse_document(&bytes)?)
}
