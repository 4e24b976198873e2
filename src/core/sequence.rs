use serde::{Deserialize, Serialize};

/// Character substituted for anything outside the nucleotide alphabet
pub const SENTINEL: char = 'n';

/// A locus sequence over the alphabet {a, c, g, t, n}
///
/// Only constructed through [`normalize`], so every value is already in
/// canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedSequence(String);

impl NormalizedSequence {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for NormalizedSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hex-encoded MD5 digest of one normalized locus sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocusDigest(pub String);

impl LocusDigest {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocusDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lowercase a raw sequence and replace every character outside {a,c,g,t}
/// with [`SENTINEL`].
///
/// Lowercasing happens first, over the whole string, so a character whose
/// lowercase form expands to several characters yields one sentinel each.
#[must_use]
pub fn normalize(sequence: &str) -> NormalizedSequence {
    let normalized = sequence
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a' | 'c' | 'g' | 't' => c,
            _ => SENTINEL,
        })
        .collect();
    NormalizedSequence(normalized)
}

/// MD5 of the UTF-8 bytes of a normalized sequence, as lowercase hex
#[must_use]
pub fn digest(normalized: &NormalizedSequence) -> LocusDigest {
    LocusDigest(format!("{:x}", md5::compute(normalized.as_str().as_bytes())))
}
