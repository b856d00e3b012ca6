//! # Model Validation
//!
//! Validates MathOptFormat model files against the schema using the
//! `jsonschema` crate (Draft 7, the dialect the MOF schema declares).
//!
//! ## Design
//!
//! [`SchemaValidator`] compiles the schema once at construction time and
//! reuses the compiled validator for every document. A document that does
//! not conform yields a non-empty `Vec<ValidationError>` in the engine's
//! order; only unreadable or unparseable input is an `Err`.
//!
//! The MOF schema only uses in-document `#/definitions/...` references.
//! Any other `$ref` is refused by a local retriever so that validation
//! never reaches out to the network.

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::schema::{Schema, SchemaError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// One way in which a document fails to conform to the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// JSON Pointer to the offending value in the document.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

// ---------------------------------------------------------------------------
// Schema retriever for $ref resolution
// ---------------------------------------------------------------------------

/// Refuses every external `$ref`.
struct LocalSchemaRetriever;

impl jsonschema::Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &jsonschema::Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema references are not supported: {}", uri.as_str()).into())
    }
}

// ---------------------------------------------------------------------------
// SchemaValidator
// ---------------------------------------------------------------------------

/// A compiled MathOptFormat schema.
pub struct SchemaValidator {
    source: String,
    validator: jsonschema::Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the engine rejects the schema.
    pub fn new(schema: &Schema) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft7)
            .with_retriever(LocalSchemaRetriever)
            .build(schema.document())
            .map_err(|e| SchemaError::Compile {
                source_name: schema.source().to_string(),
                reason: e.to_string(),
            })?;
        tracing::debug!(source = schema.source(), "compiled schema validator");
        Ok(Self {
            source: schema.source().to_string(),
            validator,
        })
    }

    /// Where the compiled schema was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Validate a parsed document. An empty result means it conforms.
    pub fn validate_value(&self, document: &Value) -> Vec<ValidationError> {
        self.validator
            .iter_errors(document)
            .map(|err| ValidationError {
                instance_path: err.instance_path.to_string(),
                schema_path: err.schema_path.to_string(),
                message: err.to_string(),
            })
            .collect()
    }

    /// Parse `bytes` as JSON and validate it. `name` identifies the
    /// document in errors.
    pub fn validate_slice(
        &self,
        bytes: &[u8],
        name: &str,
    ) -> Result<Vec<ValidationError>, SchemaError> {
        let document = parse_json_document(bytes, name)?;
        Ok(self.validate_value(&document))
    }

    /// Read and validate a model file.
    ///
    /// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else
    /// as JSON.
    pub fn validate_file(&self, path: &Path) -> Result<Vec<ValidationError>, SchemaError> {
        let name = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| SchemaError::Io {
            path: name.clone(),
            source: e,
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let document = match ext {
            "yaml" | "yml" => {
                serde_yaml::from_slice(&bytes).map_err(|e| SchemaError::DocumentParse {
                    path: name.clone(),
                    reason: format!("YAML parse error: {e}"),
                })?
            }
            _ => parse_json_document(&bytes, &name)?,
        };

        let errors = self.validate_value(&document);
        tracing::debug!(path = %name, errors = errors.len(), "validated document");
        Ok(errors)
    }
}

fn parse_json_document(bytes: &[u8], name: &str) -> Result<Value, SchemaError> {
    serde_json::from_slice(bytes).map_err(|e| SchemaError::DocumentParse {
        path: name.to_string(),
        reason: e.to_string(),
    })
}

/// Validate `document_bytes` against `schema_bytes`.
///
/// Either input failing to parse as JSON is an error; conformance failures
/// are returned as data.
pub fn validate(
    schema_bytes: &[u8],
    document_bytes: &[u8],
) -> Result<Vec<ValidationError>, SchemaError> {
    let schema = Schema::from_slice(schema_bytes, "<schema>")?;
    SchemaValidator::new(&schema)?.validate_slice(document_bytes, "<document>")
}
