//! # Schema Document
//!
//! Loads the MathOptFormat JSON Schema and exposes the lookups the
//! summarizer and validator need: the top-level `definitions` map and the
//! `oneOf` branch list of a named definition.
//!
//! ## Design
//!
//! A [`Schema`] is an owned `serde_json::Value` plus the name of where it
//! came from. It is constructed once per invocation and handed to
//! consumers by reference; nothing caches it process-wide.

use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

/// The MathOptFormat schema shipped with this crate.
pub const EMBEDDED_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../schemas/mof.schema.json"
));

/// Source name reported for the embedded schema.
pub const EMBEDDED_SOURCE: &str = "<embedded mof.schema.json>";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised while loading, inspecting or compiling a schema, or while
/// loading a candidate document.
///
/// Conformance failures of a candidate document are not represented here;
/// they are returned as a list of [`crate::ValidationError`]s.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema or document file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The schema is not valid JSON.
    #[error("failed to parse schema {source_name}: {source}")]
    SchemaParse {
        /// File path or `<embedded ...>` marker.
        source_name: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The candidate document is not valid JSON (or YAML).
    #[error("failed to parse document {path}: {reason}")]
    DocumentParse {
        /// Path or name of the document.
        path: String,
        /// Human-readable parser message.
        reason: String,
    },

    /// The schema has no top-level `definitions` object.
    #[error("schema {source_name} has no `definitions` object")]
    MissingDefinitions {
        /// File path or `<embedded ...>` marker.
        source_name: String,
    },

    /// A definition the tooling relies on is absent.
    #[error("schema definition `{key}` not found")]
    MissingDefinition {
        /// The `definitions` key that was looked up.
        key: String,
    },

    /// A definition exists but is not shaped as expected.
    #[error("schema definition `{key}` is malformed: {reason}")]
    MalformedDefinition {
        /// The `definitions` key that was looked up.
        key: String,
        /// What was expected.
        reason: String,
    },

    /// The schema could not be compiled into a validator.
    #[error("failed to compile schema {source_name}: {reason}")]
    Compile {
        /// File path or `<embedded ...>` marker.
        source_name: String,
        /// Message from the validation engine.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A parsed MathOptFormat JSON Schema document.
#[derive(Debug, Clone)]
pub struct Schema {
    document: Value,
    source: String,
}

impl Schema {
    /// Parse the schema embedded in this crate.
    pub fn embedded() -> Result<Self, SchemaError> {
        Self::from_slice(EMBEDDED_SCHEMA.as_bytes(), EMBEDDED_SOURCE)
    }

    /// Parse a schema from raw bytes. `source` names the origin in errors.
    pub fn from_slice(bytes: &[u8], source: impl Into<String>) -> Result<Self, SchemaError> {
        let source = source.into();
        let document: Value =
            serde_json::from_slice(bytes).map_err(|e| SchemaError::SchemaParse {
                source_name: source.clone(),
                source: e,
            })?;
        tracing::debug!(source = %source, "parsed schema document");
        Ok(Self { document, source })
    }

    /// Read and parse a schema file.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let bytes = std::fs::read(path).map_err(|e| SchemaError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_slice(&bytes, path.display().to_string())
    }

    /// Wrap an already parsed document.
    pub fn from_value(document: Value, source: impl Into<String>) -> Self {
        Self {
            document,
            source: source.into(),
        }
    }

    /// The raw schema document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Where the schema was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The top-level `definitions` object.
    pub fn definitions(&self) -> Result<&Map<String, Value>, SchemaError> {
        self.document
            .get("definitions")
            .and_then(Value::as_object)
            .ok_or_else(|| SchemaError::MissingDefinitions {
                source_name: self.source.clone(),
            })
    }

    /// Look up `definitions[key]`.
    pub fn definition(&self, key: &str) -> Result<&Value, SchemaError> {
        self.definitions()?
            .get(key)
            .ok_or_else(|| SchemaError::MissingDefinition {
                key: key.to_string(),
            })
    }

    /// The `oneOf` branches of `definitions[key]`, in schema order.
    pub fn one_of(&self, key: &str) -> Result<&[Value], SchemaError> {
        let definition = self.definition(key)?;
        let object = definition
            .as_object()
            .ok_or_else(|| SchemaError::MalformedDefinition {
                key: key.to_string(),
                reason: "expected an object".to_string(),
            })?;
        object
            .get("oneOf")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| SchemaError::MalformedDefinition {
                key: key.to_string(),
                reason: "expected a `oneOf` array".to_string(),
            })
    }
}
