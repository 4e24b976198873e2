//! Command-line interface for patinder.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **hash**: Build profile hashes from FASTA allele files
//! - **query**: Find database entries matching a query profile
//! - **matrix**: Write an all-vs-all distance matrix for a query and a database
//! - **placeholder**: Generate the placeholder FASTA that accompanies a submission
//!
//! ## Usage
//!
//! ```text
//! # Hash one sample's alleles into a submission TSV
//! patinder hash sample.fasta -o sample.tsv -d 2024-05-01 -l UK
//!
//! # Write only the profile hash, for use as a query
//! patinder hash sample.fasta --profile-only -o query.txt -d 2024-05-01 -l UK
//!
//! # Query a database snapshot
//! patinder query --hash-file query.txt --database snapshot.tsv --min-score 0.9
//!
//! # Distance matrix with Jaccard distances
//! patinder matrix --hash-file query.txt --database snapshot.tsv --method jaccard -o dist.tsv
//! ```

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::core::entry::SequenceEntry;
use crate::parsing::tsv;

pub mod hash;
pub mod matrix;
pub mod placeholder;
pub mod query;

#[derive(Parser)]
#[command(name = "patinder")]
#[command(version)]
#[command(about = "Hash allele profiles and match them against a surveillance database")]
#[command(
    long_about = "patinder turns per-locus allele sequences into a compact profile hash (one MD5 per locus) and compares profiles by set similarity.\n\nIt can:\n- Hash FASTA allele files into submission metadata\n- Find database entries sharing a given proportion of a query's loci\n- Build symmetric distance matrices for downstream clustering"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build profile hashes from FASTA allele files
    Hash(hash::HashArgs),

    /// Find database entries matching a query profile
    Query(query::QueryArgs),

    /// Write a distance matrix for a query and a database snapshot
    Matrix(matrix::MatrixArgs),

    /// Generate placeholder FASTA for a submission metadata file
    Placeholder(placeholder::PlaceholderArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Buffered writer for `path`, or stdout when no path is given
pub(crate) fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout().lock()))),
    }
}

/// Read a database snapshot from a TSV file, or from stdin when `path` is `-`
pub(crate) fn read_database(path: &Path) -> anyhow::Result<Vec<SequenceEntry>> {
    let entries = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        tsv::parse_database_text(&text)?
    } else {
        tsv::parse_database_file(path)
            .with_context(|| format!("Failed to read database snapshot {}", path.display()))?
    };
    Ok(entries)
}
