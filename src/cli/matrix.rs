use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{open_output, read_database, OutputFormat};
use crate::core::types::ComparisonMethod;
use crate::matching::matrix::DistanceMatrix;
use crate::parsing::hashes::read_hash_file;

#[derive(Args)]
pub struct MatrixArgs {
    /// Path to a file with a comma-separated list of hashes
    #[arg(long, required = true)]
    pub hash_file: PathBuf,

    /// Database snapshot TSV (use '-' for stdin)
    #[arg(long, required = true)]
    pub database: PathBuf,

    /// Label of the query row and column
    #[arg(long, default_value = "query")]
    pub query_name: String,

    /// Similarity measure; distances are 1 - similarity
    #[arg(long, value_enum, default_value = "proportion-matched")]
    pub method: ComparisonMethod,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute matrix subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be read, any pair has a zero
/// denominator, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MatrixArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let query = read_hash_file(&args.hash_file)
        .with_context(|| format!("Failed to read hash file {}", args.hash_file.display()))?;
    let database = read_database(&args.database)?;

    if verbose {
        eprintln!(
            "Comparing query ({} loci) against {} database entries",
            query.len(),
            database.len()
        );
    }

    let matrix = DistanceMatrix::build(&args.query_name, &query, &database, args.method)?;

    let mut out = open_output(args.output.as_deref())?;
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &matrix)?;
            writeln!(out)?;
            out.flush()?;
        }
        OutputFormat::Text | OutputFormat::Tsv => matrix.write_tsv(&mut out)?,
    }

    if let Some(path) = &args.output {
        info!(
            "Wrote {n}x{n} distance matrix to {}",
            path.display(),
            n = matrix.len()
        );
    }
    Ok(())
}
