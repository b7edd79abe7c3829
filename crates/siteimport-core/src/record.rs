//! Site records and the input file loader.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::CoreError;

/// Display label for records without a string `name`.
pub const UNNAMED_SITE: &str = "Unknown";

/// One site as read from the input file.
///
/// The payload is opaque: it is forwarded to the API exactly as loaded.
/// Only `name` is ever looked at, and only for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SiteRecord(Value);

impl SiteRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The `name` field, if present and a string.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Name to show in progress and failure output.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(UNNAMED_SITE)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for SiteRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Load the ordered list of site records from a JSON array file.
pub fn load_records(path: &Path) -> Result<Vec<SiteRecord>, CoreError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&contents, path)
}

fn parse_records(contents: &str, path: &Path) -> Result<Vec<SiteRecord>, CoreError> {
    let value: Value = serde_json::from_str(contents).map_err(|source| CoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(items) => {
            debug!(count = items.len(), path = %path.display(), "loaded site records");
            Ok(items.into_iter().map(SiteRecord).collect())
        }
        other => Err(CoreError::NotAnArray {
            path: path.to_path_buf(),
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
