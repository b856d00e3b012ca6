//! # Summarize Subcommand
//!
//! Prints the supported sets, functions and nonlinear operators of the
//! schema as markdown tables, or as JSON for downstream tooling.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use mof_schema::{render_summary, Schema, Summarizer};

/// Output format of `mof summarize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// GitHub-flavored markdown tables.
    #[default]
    Markdown,
    /// The extracted records as pretty-printed JSON.
    Json,
}

/// Arguments for the `mof summarize` subcommand.
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = SummaryFormat::Markdown)]
    pub format: SummaryFormat,

    /// Write the summary to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Execute the summarize subcommand.
pub fn run_summarize(args: &SummarizeArgs, schema: &Schema, discriminator: &str) -> Result<u8> {
    let rendered = summarize_to_string(schema, discriminator, args.format)?;
    crate::emit(args.output.as_deref(), &rendered)?;
    Ok(0)
}

/// Summarize `schema` and render it in `format`.
pub fn summarize_to_string(
    schema: &Schema,
    discriminator: &str,
    format: SummaryFormat,
) -> Result<String> {
    let summary = Summarizer::new(schema)
        .with_discriminator(discriminator)
        .summarize()
        .with_context(|| format!("failed to summarize schema {}", schema.source()))?;

    if summary.nonlinear.skipped > 0 {
        tracing::warn!(
            skipped = summary.nonlinear.skipped,
            "some nonlinear branches were left out of the summary"
        );
    }

    match format {
        SummaryFormat::Markdown => Ok(render_summary(&summary)),
        SummaryFormat::Json => {
            serde_json::to_string_pretty(&summary).context("failed to serialize summary")
        }
    }
}
