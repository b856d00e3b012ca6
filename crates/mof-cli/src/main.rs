//! # mof CLI entry point
//!
//! Parses command-line arguments, loads the schema and dispatches to the
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mof_cli::readme::{run_readme, ReadmeArgs};
use mof_cli::summarize::{run_summarize, SummarizeArgs};
use mof_cli::validate::{run_validate, ValidateArgs};

/// MathOptFormat schema tooling.
///
/// Validates model files against the MathOptFormat schema and summarizes
/// the sets, functions and nonlinear operators it supports.
#[derive(Parser, Debug)]
#[command(name = "mof", version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load the schema from this file instead of the embedded one.
    #[arg(long, value_name = "PATH", global = true)]
    schema: Option<PathBuf>,

    /// Property that identifies each variant of a `oneOf` union.
    #[arg(long, value_name = "KEY", default_value = "head", global = true)]
    discriminator: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate model files against the MathOptFormat schema.
    Validate(ValidateArgs),

    /// Print a summary of the functions and sets supported by MathOptFormat.
    Summarize(SummarizeArgs),

    /// Generate the README set and function summaries.
    Readme(ReadmeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("mof CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = mof_cli::load_schema(cli.schema.as_deref()).and_then(|schema| {
        match &cli.command {
            Commands::Validate(args) => run_validate(args, &schema),
            Commands::Summarize(args) => run_summarize(args, &schema, &cli.discriminator),
            Commands::Readme(args) => run_readme(args, &schema, &cli.discriminator),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mof",
            "summarize",
            "--schema",
            "custom.schema.json",
            "--discriminator",
            "type",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.schema, Some(PathBuf::from("custom.schema.json")));
        assert_eq!(cli.discriminator, "type");
        assert!(matches!(cli.command, Commands::Summarize(_)));
    }

    #[test]
    fn validate_requires_a_file() {
        assert!(Cli::try_parse_from(["mof", "validate"]).is_err());
        let cli = Cli::try_parse_from(["mof", "validate", "a.json", "b.yaml"]).unwrap();
        match cli.command {
            Commands::Validate(args) => assert_eq!(args.files.len(), 2),
            other => panic!("expected validate, got {other:?}"),
        }
    }

    #[test]
    fn no_arguments_or_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["mof"]).is_err());
        assert!(Cli::try_parse_from(["mof", "frobnicate"]).is_err());
    }

    #[test]
    fn default_discriminator_is_head() {
        let cli = Cli::try_parse_from(["mof", "readme"]).unwrap();
        assert_eq!(cli.discriminator, "head");
        assert!(cli.schema.is_none());
    }
}
