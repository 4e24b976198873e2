//! Centralized validation and helper functions.

use chrono::NaiveDate;

use crate::core::sequence::LocusDigest;

/// Maximum number of loci allowed in a single profile (DOS protection)
pub const MAX_LOCI: usize = 100_000;

/// Maximum number of entries allowed in a database snapshot
pub const MAX_ENTRIES: usize = 1_000_000;

/// Date format expected for collection dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate that a string is a valid MD5 checksum (32 hex characters).
///
/// # Examples
///
/// ```
/// use patinder::utils::validation::is_valid_md5;
///
/// assert!(is_valid_md5("db516c3913e179338b162b2476d1c23f"));
/// assert!(!is_valid_md5("not-an-md5"));
/// assert!(!is_valid_md5("db516c3913e179338b162b2476d1c23")); // 31 chars
/// ```
#[must_use]
pub fn is_valid_md5(s: &str) -> bool {
    s.len() == 32 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Digests in `digests` that are not lowercase 32-character hex strings
pub fn malformed_digests<'a, I>(digests: I) -> Vec<&'a LocusDigest>
where
    I: IntoIterator<Item = &'a LocusDigest>,
{
    digests
        .into_iter()
        .filter(|d| {
            let s = d.as_str();
            !is_valid_md5(s) || s.chars().any(|c| c.is_ascii_uppercase())
        })
        .collect()
}

/// Check if adding another locus would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new locus.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_locus_limit(count: usize) -> Option<String> {
    if count >= MAX_LOCI {
        Some(format!(
            "Too many loci: adding another would exceed maximum of {MAX_LOCI}"
        ))
    } else {
        None
    }
}

/// Parse an ISO `YYYY-MM-DD` collection date
///
/// # Errors
///
/// Returns the chrono parse error if the date is malformed or does not exist.
pub fn parse_collection_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_md5() {
        assert!(is_valid_md5("6aef897c3d6ff0c78aff06ac189178dd"));
        assert!(is_valid_md5("AABBCCDD11223344556677889900AABB")); // uppercase ok
        assert!(!is_valid_md5("not-an-md5"));
        assert!(!is_valid_md5("6aef897c3d6ff0c78aff06ac189178ddd")); // 33 chars
        assert!(!is_valid_md5("")); // empty
        assert!(!is_valid_md5("6aef897c3d6ff0c78aff06ac189178dg")); // invalid char
    }

    #[test]
    fn test_malformed_digests() {
        let digests = [
            LocusDigest::new("6aef897c3d6ff0c78aff06ac189178dd"),
            LocusDigest::new("6AEF897C3D6FF0C78AFF06AC189178DD"),
            LocusDigest::new("h1"),
        ];
        let bad = malformed_digests(&digests);
        assert_eq!(bad.len(), 2);
        assert_eq!(bad[1].as_str(), "h1");
    }

    #[test]
    fn test_check_locus_limit() {
        assert!(check_locus_limit(100).is_none());
        assert!(check_locus_limit(MAX_LOCI - 1).is_none());
        assert!(check_locus_limit(MAX_LOCI).is_some());
    }

    #[test]
    fn test_parse_collection_date() {
        assert!(parse_collection_date("2024-02-29").is_ok());
        assert!(parse_collection_date("2023-02-29").is_err());
        assert!(parse_collection_date("29/02/2024").is_err());
        assert!(parse_collection_date("").is_err());
    }
}
