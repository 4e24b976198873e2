use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{open_output, OutputFormat};
use crate::parsing::tsv::{placeholder_fasta, read_submission_ids};

#[derive(Args)]
pub struct PlaceholderArgs {
    /// Submission metadata TSV with a submissionId column
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output FASTA file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute placeholder subcommand
///
/// # Errors
///
/// Returns an error if the input lacks a submissionId column or the output
/// cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PlaceholderArgs, _format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let ids = read_submission_ids(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    if verbose {
        eprintln!("{} submission IDs", ids.len());
    }

    let mut out = open_output(args.output.as_deref())?;
    writeln!(out, "{}", placeholder_fasta(&ids))?;
    out.flush()?;

    if let Some(path) = &args.output {
        info!("Placeholder FASTA written to: {}", path.display());
    }
    Ok(())
}
