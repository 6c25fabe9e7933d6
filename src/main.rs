//! JSON Gauge Exporter
//!
//! Exposes numeric fields of JSON reports as Prometheus gauges.
//!
//! ```bash
//! # Run with a configuration file
//! json-gauge-exporter --config exporter.yaml
//!
//! # Single-group configuration, files supplied on the command line
//! json-gauge-exporter --config base.yaml --file reports/home.json,page=home --file reports/shop.json,page=shop
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use json_gauge_exporter::config::{load_config, load_config_with_files, Config, ConfigError, FileSpec};
use json_gauge_exporter::observability::logging;
use json_gauge_exporter::{Exporter, StartupError};

/// Prometheus exporter for numeric fields of JSON documents
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML, JSON or TOML)
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// JSON file to poll, as PATH[,LABEL=VALUE...]; replaces the `files`
    /// section of a single-group configuration
    #[arg(short, long = "file", value_parser = parse_file_arg)]
    files: Vec<FileSpec>,

    /// Log every gauge update
    #[arg(short, long)]
    debug: bool,

    /// Log level (trace, debug, info, warn, error); overrides the config
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_file_arg(arg: &str) -> Result<FileSpec, String> {
    let mut parts = arg.split(',');
    let path = parts.next().unwrap_or_default().trim();
    if path.is_empty() {
        return Err("file path is empty".to_string());
    }

    let mut file = FileSpec::new(path);
    for label in parts {
        let (key, value) = label
            .split_once('=')
            .ok_or_else(|| format!("label {:?} is not KEY=VALUE", label))?;
        if key.trim().is_empty() {
            return Err(format!("label {:?} has an empty key", label));
        }
        file = file.with_label(key.trim(), value.trim());
    }
    Ok(file)
}

fn load(args: &Args) -> Result<Config, ConfigError> {
    if args.files.is_empty() {
        load_config(&args.config)
    } else {
        load_config_with_files(&args.config, args.files.clone())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let config = load(&args);

    let level = if args.debug {
        "debug"
    } else if let Some(level) = args.log_level.as_deref() {
        level
    } else {
        config.as_ref().map(|c| c.log_level.as_str()).unwrap_or("info")
    };
    logging::init(level);

    tracing::info!("json-gauge-exporter v{} starting", env!("CARGO_PKG_VERSION"));

    let exporter = match config.map_err(StartupError::from).and_then(Exporter::from_config) {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::error!(config = ?args.config, error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        address = %exporter.config().address,
        metrics_path = %exporter.config().metrics_path(),
        poll_interval_secs = exporter.config().poll_interval_secs,
        gauges = exporter.topology().binding_count(),
        "Configuration loaded"
    );

    if let Err(e) = exporter.run().await {
        tracing::error!(error = %e, "Exporter stopped with error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
