//! Reader for FASTA allele files.
//!
//! Two layouts are supported:
//! - [`LociMode::Lines`]: every line not starting with `>` is one locus, the
//!   layout written by allele callers that emit one unwrapped sequence per
//!   record. Blank lines are loci too and digest to the MD5 of `""`
//! - [`LociMode::Records`]: every FASTA record is one locus, with wrapped
//!   sequence lines joined (parsed with noodles)
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna`, `.ffn` (uncompressed)
//! - the same with `.gz` or `.bgz` appended (gzip/bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use noodles::fasta;
use tracing::debug;

use crate::core::profile::{digest_loci, ProfileHash, HEADER_MARKER};
use crate::parsing::ParseError;
use crate::utils::validation::check_locus_limit;

/// How loci are laid out in a FASTA file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LociMode {
    /// One locus per non-header line, blank lines included
    #[default]
    Lines,
    /// One locus per FASTA record
    Records,
}

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    let stripped = path_str
        .strip_suffix(".gz")
        .or_else(|| path_str.strip_suffix(".bgz"))
        .unwrap_or(path_str.as_str());

    matches!(
        Path::new(stripped)
            .extension()
            .and_then(OsStr::to_str),
        Some("fa" | "fasta" | "fna" | "ffn")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// FASTA files directly inside `dir`, sorted by path
///
/// # Errors
///
/// Returns `ParseError::Io` if the directory cannot be listed.
pub fn fasta_files_in(dir: &Path) -> Result<Vec<PathBuf>, ParseError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_fasta_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read the per-locus sequences of a FASTA file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if a record is malformed, or `ParseError::TooManyLoci` if the limit is exceeded.
pub fn read_loci_file(path: &Path, mode: LociMode) -> Result<Vec<String>, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        read_loci(BufReader::new(GzDecoder::new(file)), mode)
    } else {
        read_loci(BufReader::new(file), mode)
    }
}

/// Read per-locus sequences from any buffered reader
///
/// Only sequences are returned. In line mode a header is a line whose first
/// character is `>`; every other line, blank or not, is trimmed and kept.
///
/// # Errors
///
/// Same as [`read_loci_file`].
pub fn read_loci<R: BufRead>(reader: R, mode: LociMode) -> Result<Vec<String>, ParseError> {
    match mode {
        LociMode::Lines => read_line_loci(reader),
        LociMode::Records => read_record_loci(&mut fasta::io::Reader::new(reader)),
    }
}

fn read_line_loci<R: BufRead>(reader: R) -> Result<Vec<String>, ParseError> {
    let mut loci = Vec::new();

    for line in reader.lines() {
        let line = line?;
        // Header detection looks at the untrimmed line
        if line.starts_with(HEADER_MARKER) {
            continue;
        }
        if check_locus_limit(loci.len()).is_some() {
            return Err(ParseError::TooManyLoci(loci.len() + 1));
        }
        loci.push(line.trim().to_string());
    }

    Ok(loci)
}

fn read_record_loci<R: BufRead>(reader: &mut fasta::io::Reader<R>) -> Result<Vec<String>, ParseError> {
    let mut loci = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        if check_locus_limit(loci.len()).is_some() {
            return Err(ParseError::TooManyLoci(loci.len() + 1));
        }

        loci.push(String::from_utf8_lossy(record.sequence().as_ref()).into_owned());
    }

    Ok(loci)
}

/// Build the profile hash for a FASTA allele file
///
/// # Errors
///
/// Same as [`read_loci_file`].
pub fn profile_from_file(path: &Path, mode: LociMode) -> Result<ProfileHash, ParseError> {
    let loci = read_loci_file(path, mode)?;
    let profile = digest_loci(&loci);
    debug!("{}: {} loci hashed", path.display(), profile.len());
    Ok(profile)
}

/// Build the profile hash from FASTA text already in memory
///
/// # Errors
///
/// Same as [`read_loci`].
pub fn profile_from_reader<R: Read>(reader: R, mode: LociMode) -> Result<ProfileHash, ParseError> {
    let loci = read_loci(BufReader::new(reader), mode)?;
    Ok(digest_loci(&loci))
}
