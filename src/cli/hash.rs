use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::cli::{open_output, OutputFormat};
use crate::parsing::fasta::{self, LociMode};
use crate::parsing::tsv::{write_submission_tsv, SubmissionRecord};
use crate::utils::validation::parse_collection_date;

#[derive(Args)]
pub struct HashArgs {
    /// FASTA allele files, or directories containing them
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Submission ID (single input only; defaults to the file name up to its first '.')
    #[arg(short = 'n', long)]
    pub submission_id: Option<String>,

    /// Collection date in ISO format (YYYY-MM-DD)
    #[arg(short, long, required_unless_present = "profile_only")]
    pub date: Option<String>,

    /// Location where the sequences were collected
    #[arg(short, long, required_unless_present = "profile_only")]
    pub location: Option<String>,

    /// Treat each FASTA record, rather than each sequence line, as one locus
    #[arg(long)]
    pub records: bool,

    /// Write only the comma-separated profile hash (single input only)
    #[arg(long)]
    pub profile_only: bool,
}

/// Execute hash subcommand
///
/// # Errors
///
/// Returns an error if arguments are inconsistent, an input cannot be read,
/// or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: HashArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let date = args
        .date
        .as_deref()
        .map(|d| {
            parse_collection_date(d)
                .with_context(|| format!("Invalid collection date '{d}', expected YYYY-MM-DD"))
        })
        .transpose()?;

    let files = expand_inputs(&args.inputs)?;
    if files.len() > 1 && (args.submission_id.is_some() || args.profile_only) {
        anyhow::bail!(
            "--submission-id and --profile-only require a single input file, got {}",
            files.len()
        );
    }

    let mode = if args.records {
        LociMode::Records
    } else {
        LociMode::Lines
    };

    let mut records = Vec::with_capacity(files.len());
    for path in &files {
        let profile = fasta::profile_from_file(path, mode)
            .with_context(|| format!("Failed to hash {}", path.display()))?;
        if profile.is_empty() {
            warn!("{}: no loci found", path.display());
        }
        if verbose {
            eprintln!("{}: {} loci", path.display(), profile.len());
        }

        records.push(SubmissionRecord {
            submission_id: args
                .submission_id
                .clone()
                .unwrap_or_else(|| default_submission_id(path)),
            collection_date: date.map(|d| d.to_string()).unwrap_or_default(),
            location: args.location.clone().unwrap_or_default(),
            profile_hash: profile,
        });
    }

    let mut out = open_output(args.output.as_deref())?;
    if args.profile_only {
        // Exactly one record, checked above
        for r in &records {
            writeln!(out, "{}", r.profile_hash)?;
        }
        out.flush()?;
    } else {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, &records)?;
                writeln!(out)?;
                out.flush()?;
            }
            OutputFormat::Text | OutputFormat::Tsv => write_submission_tsv(&records, &mut out)?,
        }
    }

    if let Some(path) = &args.output {
        info!("Output written to: {}", path.display());
    }
    Ok(())
}

/// Input files in argument order; directories contribute their FASTA files sorted
fn expand_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = fasta::fasta_files_in(input)
                .with_context(|| format!("Failed to list {}", input.display()))?;
            if found.is_empty() {
                warn!("{}: no FASTA files found", input.display());
            }
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    if files.is_empty() {
        anyhow::bail!("No FASTA input files found");
    }
    Ok(files)
}

/// File name up to its first '.', e.g. `SAL_AB1234.fasta.gz` -> `SAL_AB1234`
fn default_submission_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(ToString::to_string))
        .unwrap_or_default()
}
