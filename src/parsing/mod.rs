//! Thin readers and writers for the files the engine exchanges.
//!
//! - **FASTA allele files**: per-locus sequences produced by an external typing
//!   step ([`fasta`])
//! - **Hash files**: a single comma-separated profile hash ([`hashes`])
//! - **TSV files**: database snapshots, submission metadata and placeholder
//!   FASTA for submissions ([`tsv`])
//!
//! ## Example
//!
//! ```rust,no_run
//! use patinder::parsing::{fasta, hashes, tsv};
//! use std::path::Path;
//!
//! let profile = fasta::profile_from_file(Path::new("sample.fasta"), fasta::LociMode::Lines).unwrap();
//! let query = hashes::read_hash_file(Path::new("query.txt")).unwrap();
//! let database = tsv::parse_database_file(Path::new("snapshot.tsv")).unwrap();
//! ```

use thiserror::Error;

use crate::utils::validation::{MAX_ENTRIES, MAX_LOCI};

pub mod fasta;
pub mod hashes;
pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many loci: {0} exceeds maximum allowed ({max})", max = MAX_LOCI)]
    TooManyLoci(usize),

    #[error("Too many database entries: {0} exceeds maximum allowed ({max})", max = MAX_ENTRIES)]
    TooManyEntries(usize),
}
