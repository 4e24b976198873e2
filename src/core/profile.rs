use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::sequence::{digest, normalize, LocusDigest};

/// Separator between digests in the textual profile form
pub const DELIMITER: char = ',';

/// Prefix of FASTA header lines, which carry no sequence data
pub const HEADER_MARKER: char = '>';

/// Set view of a profile, used by every comparison
pub type DigestSet = HashSet<LocusDigest>;

/// Ordered per-locus digests for one sample
///
/// The order is kept for serialization only. Comparisons go through
/// [`ProfileHash::to_set`], where duplicate digests collapse into one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileHash {
    digests: Vec<LocusDigest>,
}

impl ProfileHash {
    #[must_use]
    pub fn new(digests: Vec<LocusDigest>) -> Self {
        Self { digests }
    }

    /// Parse the comma-joined textual form.
    ///
    /// Surrounding whitespace is trimmed from the whole string and from each
    /// token; empty tokens are dropped, so `""` parses to an empty profile.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return Self::default();
        }

        let mut digests = Vec::new();
        let mut dropped = 0usize;
        for token in s.split(DELIMITER).map(str::trim) {
            if token.is_empty() {
                dropped += 1;
            } else {
                digests.push(LocusDigest::new(token));
            }
        }
        if dropped > 0 {
            warn!("Dropped {dropped} empty digest(s) from profile string");
        }

        Self { digests }
    }

    #[must_use]
    pub fn digests(&self) -> &[LocusDigest] {
        &self.digests
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    #[must_use]
    pub fn to_set(&self) -> DigestSet {
        self.digests.iter().cloned().collect()
    }

    #[must_use]
    pub fn into_set(self) -> DigestSet {
        self.digests.into_iter().collect()
    }
}

impl std::fmt::Display for ProfileHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, d) in self.digests.iter().enumerate() {
            if i > 0 {
                write!(f, "{DELIMITER}")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl FromStr for ProfileHash {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Build a profile from per-locus sequences, in input order.
///
/// Each locus is normalized then digested. Lines starting with `>` are
/// treated as FASTA headers and skipped.
pub fn build_profile<I, S>(loci: I) -> ProfileHash
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    digest_loci(
        loci.into_iter()
            .filter(|locus| !locus.as_ref().starts_with(HEADER_MARKER)),
    )
}

/// Digest every item of `loci` as a locus sequence, in input order.
///
/// Unlike [`build_profile`] nothing is skipped: empty strings digest to the
/// MD5 of the empty string and a leading `>` is normalized like any other
/// character.
pub fn digest_loci<I, S>(loci: I) -> ProfileHash
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let digests = loci
        .into_iter()
        .map(|locus| digest(&normalize(locus.as_ref())))
        .collect();
    ProfileHash { digests }
}

/// Parse a comma-joined profile straight into its set view
#[must_use]
pub fn parse_digest_set(s: &str) -> DigestSet {
    ProfileHash::parse(s).into_set()
}
