//! # patinder
//!
//! A library for turning typed genomes into comparable profile hashes and
//! matching them against a surveillance database.
//!
//! An external allele caller produces one sequence per locus for each sample.
//! `patinder` normalizes each sequence, hashes it to an MD5 digest, and joins
//! the digests into a profile hash. Profiles are then compared as sets of
//! digests, so two samples sharing an allele at a locus share that digest.
//!
//! ## Features
//!
//! - **Deterministic hashing**: lowercase + `n`-masking before MD5, so case and
//!   ambiguity codes never split identical alleles
//! - **Proportion-matched scoring**: fraction of the query's loci present in a candidate
//! - **Jaccard scoring**: symmetric intersection-over-union of digest sets
//! - **Threshold matching**: inclusive threshold, ranked by score with stable ties
//! - **Distance matrices**: symmetric all-vs-all `1 - similarity`, computed in parallel
//!
//! ## Example
//!
//! ```rust
//! use patinder::{build_profile, ComparisonMethod, DistanceMatrix, SequenceEntry};
//!
//! let query = build_profile(["ACGT", "acgN", "GGCC"]);
//! assert_eq!(query.len(), 3);
//!
//! let database = vec![
//!     SequenceEntry::new("S1", build_profile(["ACGT", "ACGN"]).into_set()),
//!     SequenceEntry::new("S2", build_profile(["TTTT"]).into_set()),
//! ];
//!
//! let matrix = DistanceMatrix::build("query", &query.to_set(), &database, ComparisonMethod::Jaccard)
//!     .unwrap();
//! assert_eq!(matrix.len(), 3);
//! assert_eq!(matrix.get(1, 2), matrix.get(2, 1));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sequences, digests, profiles and database records
//! - [`matching`]: Scoring, threshold matching and distance matrices
//! - [`parsing`]: Readers for FASTA allele files, hash files and TSV snapshots
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::entry::SequenceEntry;
pub use crate::core::profile::{build_profile, digest_loci, DigestSet, ProfileHash};
pub use crate::core::sequence::{digest, normalize, LocusDigest, NormalizedSequence};
pub use crate::core::types::*;
pub use crate::matching::engine::{MatchResult, MatchingConfig, MatchingEngine};
pub use crate::matching::matrix::DistanceMatrix;
pub use crate::matching::scoring::{score, ScoreError};
