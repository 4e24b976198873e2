use serde::{Deserialize, Serialize};

use crate::core::profile::{DigestSet, ProfileHash};

/// One record of the remote sequence database snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceEntry {
    /// Submitter-assigned sample identifier
    pub submission_id: String,

    /// Name of the submitting group
    pub group_name: String,

    /// Identifier of the submitting group
    pub group_id: String,

    /// Collection date as recorded in the database (usually `YYYY-MM-DD`)
    pub collection_date: String,

    /// Collection location
    pub location: String,

    /// Set view of the entry's profile hash
    #[serde(serialize_with = "serialize_digest_set")]
    #[serde(deserialize_with = "deserialize_digest_set")]
    pub profile_hash: DigestSet,
}

impl SequenceEntry {
    pub fn new(submission_id: impl Into<String>, profile_hash: DigestSet) -> Self {
        Self {
            submission_id: submission_id.into(),
            group_name: String::new(),
            group_id: String::new(),
            collection_date: String::new(),
            location: String::new(),
            profile_hash,
        }
    }

    #[must_use]
    pub fn with_group(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.group_name = name.into();
        self.group_id = id.into();
        self
    }

    #[must_use]
    pub fn with_collection(mut self, date: impl Into<String>, location: impl Into<String>) -> Self {
        self.collection_date = date.into();
        self.location = location.into();
        self
    }
}

// Sets are written sorted so JSON output is stable across runs
fn serialize_digest_set<S: serde::Serializer>(set: &DigestSet, s: S) -> Result<S::Ok, S::Error> {
    let mut sorted: Vec<_> = set.iter().cloned().collect();
    sorted.sort_unstable();
    ProfileHash::new(sorted).serialize(s)
}

fn deserialize_digest_set<'de, D: serde::Deserializer<'de>>(d: D) -> Result<DigestSet, D::Error> {
    ProfileHash::deserialize(d).map(ProfileHash::into_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::parse_digest_set;

    #[test]
    fn test_builder() {
        let entry = SequenceEntry::new("S1", parse_digest_set("h1,h2"))
            .with_group("Lab", "7")
            .with_collection("2024-05-01", "UK");
        assert_eq!(entry.group_id, "7");
        assert_eq!(entry.location, "UK");
        assert_eq!(entry.profile_hash.len(), 2);
    }

    #[test]
    fn test_json_digests_sorted() {
        let entry = SequenceEntry::new("S1", parse_digest_set("h3,h1,h2"));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["profile_hash"], serde_json::json!(["h1", "h2", "h3"]));

        let back: SequenceEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
