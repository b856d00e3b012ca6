//! # Validate Subcommand
//!
//! Validates one or more model files against the MathOptFormat schema and
//! reports every violation, leading with the first one.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use mof_schema::{Schema, SchemaValidator, ValidationError};

/// Arguments for the `mof validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Model files to validate (`.json`, or `.yaml`/`.yml`).
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every file conforms, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, schema: &Schema) -> Result<u8> {
    let validator = SchemaValidator::new(schema).context("failed to compile the schema")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mut had_failures = false;
    for path in &args.files {
        let errors = validator
            .validate_file(path)
            .with_context(|| format!("failed to validate {}", path.display()))?;
        tracing::info!(path = %path.display(), errors = errors.len(), "validated model");
        had_failures |= !report(&mut out, path, &errors)?;
    }

    Ok(u8::from(had_failures))
}

/// Print the outcome for one file. Returns `true` if it conforms.
pub fn report(out: &mut impl Write, path: &Path, errors: &[ValidationError]) -> Result<bool> {
    let Some(first) = errors.first() else {
        writeln!(
            out,
            "Success! {} conforms to the MathOptFormat schema",
            path.display()
        )?;
        return Ok(true);
    };

    writeln!(out, "{} is not a valid MathOptFormat file", path.display())?;
    writeln!(out, "The error is:\n  {first}")?;
    if errors.len() > 1 {
        writeln!(out, "All {} errors:", errors.len())?;
        for (i, err) in errors.iter().enumerate() {
            writeln!(out, "  {}. {err}", i + 1)?;
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFORMANT: &str = r#"{
        "version": {"major": 0, "minor": 6},
        "variables": [{"name": "x"}],
        "objective": {"sense": "feasibility"},
        "constraints": []
    }"#;

    const MISSING_VARIABLES: &str = r#"{
        "version": {"major": 0, "minor": 6},
        "objective": {"sense": "feasibility"},
        "constraints": []
    }"#;

    fn write_model(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn error(instance_path: &str, message: &str) -> ValidationError {
        ValidationError {
            instance_path: instance_path.to_string(),
            schema_path: String::new(),
            message: message.to_string(),
        }
    }

    #[test]
    fn success_message_names_the_file() {
        let mut out = Vec::new();
        let ok = report(&mut out, Path::new("model.mof.json"), &[]).unwrap();
        assert!(ok);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Success! model.mof.json conforms to the MathOptFormat schema\n"
        );
    }

    #[test]
    fn failure_leads_with_first_error_and_lists_all() {
        let errors = [
            error("", "\"variables\" is a required property"),
            error("/objective/sense", "\"minimise\" is not one of [\"min\",\"max\"]"),
        ];
        let mut out = Vec::new();
        let ok = report(&mut out, Path::new("bad.json"), &errors).unwrap();
        assert!(!ok);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("bad.json is not a valid MathOptFormat file\n"));
        assert!(text.contains("The error is:\n  (root): \"variables\" is a required property\n"));
        assert!(text.contains("All 2 errors:\n"));
        assert!(text.contains("  2. /objective/sense: "));
    }

    #[test]
    fn run_validate_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_model(dir.path(), "good.mof.json", CONFORMANT);
        let bad = write_model(dir.path(), "bad.mof.json", MISSING_VARIABLES);
        let schema = Schema::embedded().unwrap();

        let args = ValidateArgs { files: vec![good.clone()] };
        assert_eq!(run_validate(&args, &schema).unwrap(), 0);

        let args = ValidateArgs { files: vec![good, bad] };
        assert_eq!(run_validate(&args, &schema).unwrap(), 1);
    }

    #[test]
    fn run_validate_unparseable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write_model(dir.path(), "broken.mof.json", "{\"version\": ");
        let args = ValidateArgs { files: vec![broken] };
        let err = run_validate(&args, &Schema::embedded().unwrap()).unwrap_err();
        assert!(format!("{err:#}").contains("broken.mof.json"));
    }
}
