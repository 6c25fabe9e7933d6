//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Build the registry and topology in dependency order
//! - Start the poller task
//! - Bind the listener and begin serving scrapes
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use prometheus::Registry;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{
    load_config, load_config_with_files, validate_config, Config, ConfigError, FileSpec,
};
use crate::http::MetricsServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics::ExporterMetrics;
use crate::poller::Poller;
use crate::topology::{Topology, TopologyError};

/// Errors that stop the exporter before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error("failed to register exporter metrics: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("metrics server failed: {0}")]
    Serve(#[source] std::io::Error),
}

/// A fully initialized exporter, ready to run.
pub struct Exporter {
    config: Config,
    registry: Registry,
    topology: Topology,
    metrics: ExporterMetrics,
}

impl Exporter {
    /// Load `path` and build the exporter from it.
    pub fn from_config_file(path: &Path) -> Result<Self, StartupError> {
        Self::from_config(load_config(path)?)
    }

    /// Load `path`, whose single group reads `files` instead of its own
    /// `files` section.
    pub fn with_files(path: &Path, files: Vec<FileSpec>) -> Result<Self, StartupError> {
        Self::from_config(load_config_with_files(path, files)?)
    }

    /// Validate `config` and build the exporter from it.
    pub fn from_config(config: Config) -> Result<Self, StartupError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let registry = Registry::new();
        let metrics = ExporterMetrics::register(&registry)?;
        let topology = Topology::build(&config, &registry)?;

        Ok(Self {
            config,
            registry,
            topology,
            metrics,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Bind the configured address and serve until SIGINT/SIGTERM.
    pub async fn run(self) -> Result<(), StartupError> {
        let listener = TcpListener::bind(self.config.address.as_str())
            .await
            .map_err(|source| StartupError::Bind {
                address: self.config.address.clone(),
                source,
            })?;

        let shutdown = Shutdown::new();
        let serving = self.serve(listener, shutdown.clone());

        tokio::spawn(async move {
            signals::terminate_signal().await;
            shutdown.trigger();
        });

        serving.await
    }

    /// Serve on an already bound listener until `shutdown` fires.
    ///
    /// The poller and the server subscribe to `shutdown` when this is
    /// called, so a trigger sent before the returned future is polled
    /// still stops both.
    pub fn serve(
        self,
        listener: TcpListener,
        shutdown: Shutdown,
    ) -> impl Future<Output = Result<(), StartupError>> {
        let poller_shutdown = shutdown.subscribe();
        let server_shutdown = shutdown.subscribe();

        let interval = Duration::from_secs(self.config.poll_interval_secs);
        let server = MetricsServer::new(self.registry, &self.config.metrics_path());
        let poller = Poller::new(self.topology, interval, self.metrics);

        async move {
            let poller_task = tokio::spawn(poller.run(poller_shutdown));
            let result = server.run(listener, server_shutdown).await;

            shutdown.trigger();
            if let Err(e) = poller_task.await {
                tracing::error!(error = %e, "Poller task failed");
            }

            result.map_err(StartupError::Serve)
        }
    }
}
