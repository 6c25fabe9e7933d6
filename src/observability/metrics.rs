//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define exporter self metrics (poll cycles, failures, duration)
//! - Encode a registry in the Prometheus text format
//!
//! # Metrics
//! - `json_exporter_poll_cycles_total` (counter): completed poll cycles
//! - `json_exporter_extraction_failures_total` (counter): failed updates by namespace
//! - `json_exporter_last_poll_duration_seconds` (gauge): duration of the last cycle

use prometheus::{Encoder, Gauge, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

const PREFIX: &str = "json_exporter";

/// Self metrics describing the poller.
#[derive(Clone)]
pub struct ExporterMetrics {
    pub poll_cycles: IntCounter,
    pub extraction_failures: IntCounterVec,
    pub last_poll_duration: Gauge,
}

impl ExporterMetrics {
    /// Create the metrics without registering them.
    pub fn new() -> Result<Self, prometheus::Error> {
        Ok(Self {
            poll_cycles: IntCounter::with_opts(
                Opts::new("poll_cycles_total", "Completed poll cycles").namespace(PREFIX),
            )?,
            extraction_failures: IntCounterVec::new(
                Opts::new(
                    "extraction_failures_total",
                    "Gauge updates that fell back to zero",
                )
                .namespace(PREFIX),
                &["namespace"],
            )?,
            last_poll_duration: Gauge::with_opts(
                Opts::new(
                    "last_poll_duration_seconds",
                    "Wall time of the most recent poll cycle",
                )
                .namespace(PREFIX),
            )?,
        })
    }

    /// Create the metrics and register them with `registry`.
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let metrics = Self::new()?;
        registry.register(Box::new(metrics.poll_cycles.clone()))?;
        registry.register(Box::new(metrics.extraction_failures.clone()))?;
        registry.register(Box::new(metrics.last_poll_duration.clone()))?;
        Ok(metrics)
    }

    pub fn record_failure(&self, namespace: &str) {
        self.extraction_failures.with_label_values(&[namespace]).inc();
    }
}

/// Encode all metrics of `registry` to Prometheus text format.
pub fn encode(registry: &Registry) -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
