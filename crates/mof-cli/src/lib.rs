//! # mof-cli — MathOptFormat Command-Line Interface
//!
//! Provides the `mof` command-line interface over `mof-schema`.
//!
//! ## Subcommands
//!
//! - `mof validate` — Validate model files against the schema.
//! - `mof summarize` — Print the tables of supported sets, functions and
//!   nonlinear operators.
//! - `mof readme` — Generate the README set and function summaries,
//!   optionally splicing them into a template.
//!
//! ```bash
//! mof validate model.mof.json
//! mof summarize --format json
//! mof --schema schemas/mof.schema.json readme README.template.md -o README.md
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs` and the `*Args` structs; the
//!   handlers delegate to `mof-schema`.
//! - Handlers return an exit code: 0 on success, 1 when a document fails
//!   validation. Operational failures are `Err`.

pub mod readme;
pub mod summarize;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use mof_schema::Schema;

/// Load the schema from `path`, or the embedded schema when `None`.
pub fn load_schema(path: Option<&Path>) -> Result<Schema> {
    match path {
        Some(path) => Schema::from_path(path)
            .with_context(|| format!("failed to load schema from {}", path.display())),
        None => Schema::embedded().context("failed to load the embedded schema"),
    }
}

/// Write `content` to `output`, or print it to stdout when `None`.
pub fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = content.len(), "wrote output");
        }
        None => println!("{content}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_embedded_schema() {
        let schema = load_schema(None).unwrap();
        assert!(schema.definition("scalar_sets").is_ok());
    }

    #[test]
    fn load_schema_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.schema.json");
        let err = load_schema(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("nope.schema.json"));
    }

    #[test]
    fn emit_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        emit(Some(&path), "| a |\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "| a |\n");
    }
}
