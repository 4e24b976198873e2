//! Core data types for profile hashing.
//!
//! - [`NormalizedSequence`](sequence::NormalizedSequence) and
//!   [`LocusDigest`](sequence::LocusDigest): one locus, canonicalized and hashed
//! - [`ProfileHash`](profile::ProfileHash): ordered digests for one sample
//! - [`SequenceEntry`](entry::SequenceEntry): a database record
//! - [`ComparisonMethod`](types::ComparisonMethod), [`Confidence`](types::Confidence)
//!
//! ## Normalization
//!
//! Sequences are lowercased and every character outside `{a,c,g,t}` becomes
//! `n` before hashing, so `ACGT`, `acgt` and `AcGt` share a digest while
//! ambiguity codes and gaps are all masked the same way.

pub mod entry;
pub mod profile;
pub mod sequence;
pub mod types;
