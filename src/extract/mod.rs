//! Value extraction from JSON documents.
//!
//! # Responsibilities
//! - Parse raw file bytes into a JSON document
//! - Resolve a dotted extraction path against the document
//! - Classify the outcome: number, missing, or non-numeric
//!
//! # Path Syntax
//! ```text
//! categories.performance.score      object keys
//! audits.0.score                    array index
//! $.categories.performance.score    optional root marker
//! ```

use serde_json::Value;
use thiserror::Error;

/// Reasons an extraction produced no number.
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("document is not valid JSON: {0}")]
    Parse(String),

    #[error("invalid extraction path {0:?}")]
    InvalidPath(String),

    #[error("path segment {segment:?} not found")]
    NotFound { segment: String },

    #[error("value is not numeric (found {found})")]
    NotNumeric { found: &'static str },
}

/// Parse raw bytes into a JSON document.
pub fn parse_document(bytes: &[u8]) -> Result<Value, ExtractError> {
    serde_json::from_slice(bytes).map_err(|e| ExtractError::Parse(e.to_string()))
}

/// Extract the number at `path`.
pub fn query(document: &Value, path: &str) -> Result<f64, ExtractError> {
    let value = lookup(document, path)?;
    value.as_f64().ok_or(ExtractError::NotNumeric {
        found: type_name(value),
    })
}

/// Resolve `path` to the JSON value it addresses.
pub fn lookup<'a>(document: &'a Value, path: &str) -> Result<&'a Value, ExtractError> {
    let trimmed = path.trim();
    let trimmed = trimmed
        .strip_prefix("$.")
        .or_else(|| trimmed.strip_prefix('$'))
        .unwrap_or(trimmed);

    if trimmed.is_empty() {
        return Ok(document);
    }

    let mut current = document;
    for segment in trimmed.split('.') {
        if segment.is_empty() {
            return Err(ExtractError::InvalidPath(path.to_string()));
        }

        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };

        current = next.ok_or_else(|| ExtractError::NotFound {
            segment: segment.to_string(),
        })?;
    }

    Ok(current)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
