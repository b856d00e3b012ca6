//! # Readme Subcommand
//!
//! Rebuilds the lists of supported sets and functions in the README from
//! the schema. With a template, `[[[AUTOMATICALLY_GENERATED_SET_SUMMARY]]]`
//! and `[[[AUTOMATICALLY_GENERATED_FUNCTION_SUMMARY]]]` are replaced by the
//! generated tables; without one, both summaries are printed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mof_schema::{ReadmeSections, Schema, Summarizer};

/// Arguments for the `mof readme` subcommand.
#[derive(Args, Debug)]
pub struct ReadmeArgs {
    /// README template containing the summary placeholders.
    #[arg(value_name = "TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Write the result to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Execute the readme subcommand.
pub fn run_readme(args: &ReadmeArgs, schema: &Schema, discriminator: &str) -> Result<u8> {
    let sections = readme_sections(schema, discriminator)?;
    let rendered = match &args.template {
        Some(path) => {
            let template = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read template {}", path.display()))?;
            sections.apply(&template)
        }
        None => sections.to_markdown(),
    };
    crate::emit(args.output.as_deref(), &rendered)?;
    Ok(0)
}

/// Build the set and function summaries for `schema`.
pub fn readme_sections(schema: &Schema, discriminator: &str) -> Result<ReadmeSections> {
    let summary = Summarizer::new(schema)
        .with_discriminator(discriminator)
        .summarize()
        .with_context(|| format!("failed to summarize schema {}", schema.source()))?;
    Ok(ReadmeSections::from_summary(&summary))
}
