//! # mof-schema — MathOptFormat Schema Tooling
//!
//! Validates optimization-model files against the MathOptFormat JSON Schema
//! and introspects that schema to produce the markdown tables of supported
//! sets, functions and nonlinear operators found in the README.
//!
//! ## Schema (`schema`)
//!
//! [`Schema`] wraps a parsed schema document. The canonical
//! `schemas/mof.schema.json` is embedded at compile time and available via
//! [`Schema::embedded`]; any other file can be loaded with
//! [`Schema::from_path`].
//!
//! ## Summaries (`variant`, `summary`, `render`)
//!
//! Every summarized definition is a `oneOf` union whose branches carry a
//! `head` discriminator, either a `const` string or an `enum` of strings.
//! [`variant::extract`] turns one branch into [`VariantRecord`]s,
//! [`Summarizer`] applies it to whole categories and to the
//! `NonlinearTerm` definition, and [`render`] turns the result into
//! GitHub-flavored markdown.
//!
//! ## Validation (`validate`)
//!
//! [`SchemaValidator`] compiles the schema once with the `jsonschema`
//! crate and reports every violation of a candidate document as a
//! [`ValidationError`]. Conformance failures are data, not errors.
//!
//! ## Crate Policy
//!
//! - No global state: a [`Schema`] is built once and passed by reference.
//! - Summarization never aborts on a single odd branch; only a missing or
//!   malformed top-level definition is an error.
//! - Output is deterministic: the same schema bytes always render to the
//!   same markdown.

pub mod render;
pub mod schema;
pub mod summary;
pub mod validate;
pub mod variant;

// Re-export primary types.
pub use render::{render_summary, render_with_template, ReadmeSections};
pub use schema::{Schema, SchemaError, EMBEDDED_SCHEMA};
pub use summary::{
    Arity, Category, CategoryTable, NonlinearSummary, OperatorRecord, SchemaSummary, Summarizer,
};
pub use validate::{validate, SchemaValidator, ValidationError};
pub use variant::{HeadKind, VariantRecord};
