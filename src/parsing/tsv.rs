use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::entry::SequenceEntry;
use crate::core::profile::ProfileHash;
use crate::parsing::ParseError;
use crate::utils::validation::{MAX_ENTRIES, MAX_LOCI};

/// Columns every database snapshot must carry
pub const DATABASE_COLUMNS: [&str; 6] = [
    "submissionId",
    "groupName",
    "groupId",
    "collectionDate",
    "location",
    "profileHash",
];

/// Columns of a submission metadata file, in output order
pub const SUBMISSION_COLUMNS: [&str; 4] =
    ["submissionId", "collectionDate", "location", "profileHash"];

/// Placeholder sequence written for each submission
pub const PLACEHOLDER_SEQUENCE: &str = "NNN";

/// Header of a tab-separated file, mapping column name to index
struct Header {
    columns: HashMap<String, usize>,
}

impl Header {
    fn parse(line: &str) -> Self {
        let columns = line
            .split('\t')
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self { columns }
    }

    fn require(&self, name: &str) -> Result<usize, ParseError> {
        self.columns.get(name).copied().ok_or_else(|| {
            ParseError::MalformedInput(format!("\"{name}\" column not found in the TSV header"))
        })
    }
}

/// Data lines of `text` with their 1-based line numbers, header first
fn data_lines<'a>(text: &'a str) -> impl Iterator<Item = (usize, &'a str)> + Clone + 'a {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn field<'a>(fields: &[&'a str], index: usize, line_num: usize) -> Result<&'a str, ParseError> {
    fields.get(index).copied().map(str::trim).ok_or_else(|| {
        ParseError::MalformedInput(format!(
            "Line {line_num} has {} fields, expected at least {}",
            fields.len(),
            index + 1
        ))
    })
}

/// Parse a database snapshot TSV file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_database_file(path: &Path) -> Result<Vec<SequenceEntry>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_database_text(&content)
}

/// Parse database snapshot TSV text
///
/// Text with no header at all is an empty database, not an error.
///
/// # Errors
///
/// Returns `ParseError::MalformedInput` if a required column is missing or a
/// row is too short, `ParseError::TooManyEntries` if the snapshot has too many
/// rows, or `ParseError::TooManyLoci` if a row's profile has too many digests.
pub fn parse_database_text(text: &str) -> Result<Vec<SequenceEntry>, ParseError> {
    let mut lines = data_lines(text);
    let Some((_, header_line)) = lines.next() else {
        debug!("Database snapshot is empty");
        return Ok(Vec::new());
    };

    let header = Header::parse(header_line);
    let id_col = header.require("submissionId")?;
    let group_name_col = header.require("groupName")?;
    let group_id_col = header.require("groupId")?;
    let date_col = header.require("collectionDate")?;
    let location_col = header.require("location")?;
    let hash_col = header.require("profileHash")?;

    // Row count is checked before any entry is built
    let row_count = lines.clone().count();
    if row_count > MAX_ENTRIES {
        return Err(ParseError::TooManyEntries(row_count));
    }

    let mut entries = Vec::with_capacity(row_count);
    for (line_num, line) in lines {
        let fields: Vec<&str> = line.split('\t').collect();
        let submission_id = field(&fields, id_col, line_num)?;
        let profile = ProfileHash::parse(field(&fields, hash_col, line_num)?);
        if profile.len() > MAX_LOCI {
            warn!("Entry '{submission_id}' (line {line_num}) exceeds the locus limit");
            return Err(ParseError::TooManyLoci(profile.len()));
        }
        let profile_hash = profile.into_set();
        if profile_hash.is_empty() {
            warn!("Entry '{submission_id}' (line {line_num}) has an empty profile hash");
        }

        entries.push(
            SequenceEntry::new(submission_id, profile_hash)
                .with_group(
                    field(&fields, group_name_col, line_num)?,
                    field(&fields, group_id_col, line_num)?,
                )
                .with_collection(
                    field(&fields, date_col, line_num)?,
                    field(&fields, location_col, line_num)?,
                ),
        );
    }

    debug!("Parsed {} database entries", entries.len());
    Ok(entries)
}

/// One row of a submission metadata file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub submission_id: String,
    pub collection_date: String,
    pub location: String,
    pub profile_hash: ProfileHash,
}

/// Write submission metadata as TSV with a header row
///
/// # Errors
///
/// Returns any I/O error from the writer.
pub fn write_submission_tsv<W: Write>(
    records: &[SubmissionRecord],
    mut out: W,
) -> std::io::Result<()> {
    writeln!(out, "{}", SUBMISSION_COLUMNS.join("\t"))?;
    for r in records {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            r.submission_id, r.collection_date, r.location, r.profile_hash
        )?;
    }
    out.flush()
}

/// Read the `submissionId` column of a submission metadata file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or
/// `ParseError::MalformedInput` if the column is missing.
pub fn read_submission_ids(path: &Path) -> Result<Vec<String>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_submission_ids(&content)
}

/// Extract the `submissionId` column from submission TSV text
///
/// # Errors
///
/// Returns `ParseError::MalformedInput` if the header is missing the column
/// or a row is too short.
pub fn parse_submission_ids(text: &str) -> Result<Vec<String>, ParseError> {
    let mut lines = data_lines(text);
    let header = lines
        .next()
        .map(|(_, line)| Header::parse(line))
        .ok_or_else(|| ParseError::MalformedInput("TSV file has no header".to_string()))?;
    let id_col = header.require(SUBMISSION_COLUMNS[0])?;

    lines
        .map(|(line_num, line)| {
            let fields: Vec<&str> = line.split('\t').collect();
            field(&fields, id_col, line_num).map(ToString::to_string)
        })
        .collect()
}

/// FASTA with one placeholder record per submission id
///
/// Records are joined by newlines with no trailing newline.
#[must_use]
pub fn placeholder_fasta(submission_ids: &[String]) -> String {
    submission_ids
        .iter()
        .map(|id| format!(">{id}\n{PLACEHOLDER_SEQUENCE}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::build_profile;
    use crate::core::sequence::LocusDigest;

    const SNAPSHOT: &str = "submissionId\tgroupName\tgroupId\tcollectionDate\tlocation\tprofileHash
S1\tLab A\t1\t2024-01-02\tUK\th1,h2,h3
S2\tLab B\t2\t2024-03-04\tUSA\th2,h4
";

    #[test]
    fn test_parse_database_text() {
        let entries = parse_database_text(SNAPSHOT).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].submission_id, "S1");
        assert_eq!(entries[0].group_name, "Lab A");
        assert_eq!(entries[1].group_id, "2");
        assert_eq!(entries[1].collection_date, "2024-03-04");
        assert_eq!(entries[1].location, "USA");
        assert_eq!(entries[0].profile_hash.len(), 3);
        assert!(entries[1].profile_hash.contains(&LocusDigest::new("h4")));
    }

    #[test]
    fn test_columns_located_by_name() {
        let text = "profileHash\tlocation\tcollectionDate\tgroupId\tgroupName\tsubmissionId\textra
h1\tUK\t2024-01-02\t1\tLab A\tS1\tx
";
        let entries = parse_database_text(text).unwrap();
        assert_eq!(entries[0].submission_id, "S1");
        assert_eq!(entries[0].location, "UK");
    }

    #[test]
    fn test_missing_profile_column_is_malformed() {
        let text = "submissionId\tgroupName\tgroupId\tcollectionDate\tlocation\nS1\tA\t1\t2024-01-02\tUK\n";
        let err = parse_database_text(text).unwrap_err();
        assert!(matches!(err, ParseError::MalformedInput(ref m) if m.contains("profileHash")));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let text = "submissionId\tgroupName\tgroupId\tcollectionDate\tlocation\tprofileHash\nS1\tA\n";
        assert!(matches!(
            parse_database_text(text),
            Err(ParseError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_empty_snapshot_is_empty_database() {
        assert!(parse_database_text("").unwrap().is_empty());
        let header_only = format!("{}\n", DATABASE_COLUMNS.join("\t"));
        assert!(parse_database_text(&header_only).unwrap().is_empty());
    }

    #[test]
    fn test_database_row_with_too_many_loci() {
        let profile = vec!["h1"; MAX_LOCI + 1].join(",");
        let text = format!(
            "{}\nS1\tA\t1\t2024-01-02\tUK\t{profile}\n",
            DATABASE_COLUMNS.join("\t")
        );
        let result = parse_database_text(&text);
        assert!(matches!(result, Err(ParseError::TooManyLoci(n)) if n == MAX_LOCI + 1));
    }

    #[test]
    fn test_snapshot_with_too_many_entries() {
        let mut text = format!("{}\n", DATABASE_COLUMNS.join("\t"));
        text.push_str(&"S\n".repeat(MAX_ENTRIES + 1));
        let result = parse_database_text(&text);
        assert!(matches!(result, Err(ParseError::TooManyEntries(n)) if n == MAX_ENTRIES + 1));
    }

    #[test]
    fn test_write_submission_tsv() {
        let records = vec![SubmissionRecord {
            submission_id: "S1".to_string(),
            collection_date: "2024-01-02".to_string(),
            location: "UK".to_string(),
            profile_hash: build_profile(["ACGT", "acgN"]),
        }];
        let mut buf = Vec::new();
        write_submission_tsv(&records, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "submissionId\tcollectionDate\tlocation\tprofileHash\n\
             S1\t2024-01-02\tUK\tdb516c3913e179338b162b2476d1c23f,ae6e062c05831ef49668971784e1b99f\n"
        );

        assert_eq!(parse_submission_ids(&text).unwrap(), ["S1"]);
    }

    #[test]
    fn test_submission_ids_require_column() {
        let err = parse_submission_ids("id\tlocation\nS1\tUK\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedInput(_)));
    }

    #[test]
    fn test_placeholder_fasta() {
        let ids = vec!["S1".to_string(), "S2".to_string()];
        assert_eq!(placeholder_fasta(&ids), ">S1\nNNN\n>S2\nNNN");
        assert_eq!(placeholder_fasta(&[]), "");
    }
}
