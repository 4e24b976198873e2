//! Reader for query hash files: one comma-separated profile hash.

use std::path::Path;

use tracing::warn;

use crate::core::profile::{DigestSet, ProfileHash};
use crate::parsing::ParseError;
use crate::utils::validation::{malformed_digests, MAX_LOCI};

/// Read a hash file into its digest set
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or
/// `ParseError::TooManyLoci` if it holds more than the allowed number of digests.
pub fn read_hash_file(path: &Path) -> Result<DigestSet, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_hash_text(&content)
}

/// Parse hash file content into its digest set
///
/// # Errors
///
/// Returns `ParseError::TooManyLoci` if the limit is exceeded.
pub fn parse_hash_text(text: &str) -> Result<DigestSet, ParseError> {
    let profile = ProfileHash::parse(text);

    if profile.len() > MAX_LOCI {
        return Err(ParseError::TooManyLoci(profile.len()));
    }

    let malformed = malformed_digests(profile.digests());
    if let Some(first) = malformed.first() {
        warn!(
            "{} of {} query digests are not lowercase MD5 hex (first: '{first}')",
            malformed.len(),
            profile.len()
        );
    }

    let set = profile.into_set();
    if set.is_empty() {
        warn!("Query hash file contains no digests");
    }
    Ok(set)
}
