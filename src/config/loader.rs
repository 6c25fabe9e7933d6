//! Configuration loading from disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{Config, FileSpec};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("exactly one group is required when files are supplied externally, found {found}")]
    SingleGroupRequired { found: usize },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Supported configuration encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Format::Json,
            Some("toml") => Format::Toml,
            _ => Format::Yaml,
        }
    }
}

/// Load and validate configuration from a file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load a configuration whose single group reads `files` instead of its
/// own `files` section.
///
/// Files are keyed by their path. Fails unless the configuration declares
/// exactly one group.
pub fn load_config_with_files(path: &Path, files: Vec<FileSpec>) -> Result<Config, ConfigError> {
    let mut config = read_config(path)?;

    if config.groups.len() != 1 {
        return Err(ConfigError::SingleGroupRequired {
            found: config.groups.len(),
        });
    }

    let replacement: BTreeMap<String, FileSpec> = files
        .into_iter()
        .map(|file| (file.file_path.clone(), file))
        .collect();
    for group in config.groups.values_mut() {
        group.files = replacement.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content, Format::from_path(path)).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(content: &str, format: Format) -> Result<Config, String> {
    match format {
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML: &str = r#"
address: "127.0.0.1:9100"
groups:
  lightheus:
    labels: { host: a.com }
    metrics:
      performance: { help: Performance score, path: categories.performance.score }
    files:
      home: { filepath: a.json }
"#;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let file = write_temp(".yaml", YAML);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.address, "127.0.0.1:9100");
        assert_eq!(config.groups["lightheus"].files["home"].file_path, "a.json");
    }

    #[test]
    fn test_load_toml() {
        let toml = r#"
address = "127.0.0.1:9100"

[groups.lightheus.metrics.performance]
help = "Performance score"
path = "categories.performance.score"

[groups.lightheus.files.home]
filepath = "a.json"
"#;
        let file = write_temp(".toml", toml);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.groups["lightheus"].metrics["performance"].path, "categories.performance.score");
    }

    #[test]
    fn test_load_json() {
        let json = r#"{
  "address": "127.0.0.1:9100",
  "groups": {
    "lightheus": {
      "metrics": { "performance": { "help": "Performance score", "path": "categories.performance.score" } },
      "files": { "home": { "filepath": "a.json" } }
    }
  }
}"#;
        let file = write_temp(".json", json);
        assert!(load_config(file.path()).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/exporter.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_yaml() {
        let file = write_temp(".yaml", "groups: [unclosed");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validation_error_names_config_key() {
        let file = write_temp(".yaml", &YAML.replace("help: Performance score, ", ""));
        let err = load_config(file.path()).unwrap_err();
        assert!(err
            .to_string()
            .contains("groups.lightheus.metrics.performance.help: is required"));
    }

    #[test]
    fn test_with_files_replaces_files() {
        let file = write_temp(".yaml", YAML);
        let files = vec![
            FileSpec::new("x.json").with_label("page", "x"),
            FileSpec::new("y.json").with_label("page", "y"),
        ];
        let config = load_config_with_files(file.path(), files).unwrap();
        let group = &config.groups["lightheus"];
        assert_eq!(group.files.len(), 2);
        assert_eq!(group.files["x.json"].labels["page"], "x");
        assert!(!group.files.contains_key("home"));
    }

    #[test]
    fn test_with_files_requires_single_group() {
        let two_groups = format!(
            "{}\n  other:\n    metrics:\n      m: {{ help: h, path: p }}\n    files:\n      f: {{ filepath: b.json }}\n",
            YAML.trim_end()
        );
        let file = write_temp(".yaml", &two_groups);
        let err = load_config_with_files(file.path(), vec![FileSpec::new("x.json")]).unwrap_err();
        assert!(matches!(err, ConfigError::SingleGroupRequired { found: 2 }));
    }

    #[test]
    fn test_with_files_empty_list_fails_validation() {
        let file = write_temp(".yaml", YAML);
        let err = load_config_with_files(file.path(), Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
