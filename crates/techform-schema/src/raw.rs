//! # Raw Input
//!
//! The untyped key-value structure handed to the schema engine. It mirrors
//! the form layout: `name`, `email` and `password` as (usually) strings, and
//! `techs` as a list of objects whose `title`/`knowledge` may be strings or
//! numbers. Nothing here validates field content; that is the engine's job.
//!
//! Documents may be JSON or YAML. YAML is deserialized straight into the
//! JSON value tree so both formats follow one code path.

use std::path::Path;

use serde_json::{Map, Value};
use techform_core::TechformError;

/// Raw form values, keyed by top-level field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInput {
    fields: Map<String, Value>,
}

impl RawInput {
    /// Wrap an already-built field map.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wrap a JSON value. The top level must be an object.
    pub fn from_json(value: Value) -> Result<Self, TechformError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(TechformError::InputLoad {
                source_name: "<value>".to_string(),
                reason: format!("expected an object at the top level, found {}", kind(&other)),
            }),
        }
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str, source_name: &str) -> Result<Self, TechformError> {
        let value: Value = serde_json::from_str(content).map_err(|e| TechformError::InputLoad {
            source_name: source_name.to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;
        Self::from_json(value).map_err(|e| rename_source(e, source_name))
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str, source_name: &str) -> Result<Self, TechformError> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| TechformError::InputLoad {
            source_name: source_name.to_string(),
            reason: format!("invalid YAML: {e}"),
        })?;
        Self::from_json(value).map_err(|e| rename_source(e, source_name))
    }

    /// Load a document from disk.
    ///
    /// `.yaml`/`.yml` files are parsed as YAML; everything else as JSON.
    pub fn from_path(path: &Path) -> Result<Self, TechformError> {
        let source_name = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| TechformError::InputLoad {
            source_name: source_name.clone(),
            reason: format!("cannot read file: {e}"),
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yaml" | "yml" => Self::from_yaml_str(&content, &source_name),
            _ => Self::from_json_str(&content, &source_name),
        }
    }

    /// Raw value of a top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The input as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Short description of a JSON value's kind for messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn rename_source(err: TechformError, source_name: &str) -> TechformError {
    match err {
        TechformError::InputLoad { reason, .. } => TechformError::InputLoad {
            source_name: source_name.to_string(),
            reason,
        },
        other => other,
    }
}
