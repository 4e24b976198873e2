//! End-to-end tests for the patinder binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ACGT: &str = "db516c3913e179338b162b2476d1c23f";
const ACGN: &str = "ae6e062c05831ef49668971784e1b99f";

fn patinder() -> Command {
    Command::cargo_bin("patinder").unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Snapshot where S_close shares 19 of 20 query loci, S_half 10 and S_far 2
fn write_fixture(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let loci: Vec<String> = (0..20).map(|i| format!("{i:032x}")).collect();
    let hash_file = write(dir, "query.txt", &format!("{}\n", loci.join(",")));

    let mut snapshot =
        String::from("submissionId\tgroupName\tgroupId\tcollectionDate\tlocation\tprofileHash\n");
    for (id, shared, group) in [("S_half", 10, "2"), ("S_close", 19, "1"), ("S_far", 2, "3")] {
        snapshot.push_str(&format!(
            "{id}\tLab {group}\t{group}\t2024-01-0{group}\tUK\t{}\n",
            loci[..shared].join(",")
        ));
    }
    let database = write(dir, "snapshot.tsv", &snapshot);
    (hash_file, database)
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn test_hash_writes_submission_tsv() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "SAL_0001.fasta", ">aroC\nACGT\n>dnaN\nacgN\n");

    patinder()
        .args(["hash", path_str(&fasta), "-d", "2024-05-01", "-l", "UK"])
        .assert()
        .success()
        .stdout(predicate::eq(format!(
            "submissionId\tcollectionDate\tlocation\tprofileHash\n\
             SAL_0001\t2024-05-01\tUK\t{ACGT},{ACGN}\n"
        )));
}

#[test]
fn test_hash_profile_only_to_file() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "sample.fa", ">a\nACGT\n>b\nacgN\n");
    let out = dir.path().join("query.txt");

    patinder()
        .args(["hash", path_str(&fasta), "--profile-only", "-d", "2024-05-01", "-l", "UK"])
        .args(["-o", path_str(&out)])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).unwrap();
    assert_eq!(content, format!("{ACGT},{ACGN}\n"));
}

#[test]
fn test_hash_profile_only_needs_no_metadata() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "sample.fa", ">a\nACGT\n>b\n\n>c\nacgN\n");

    patinder()
        .args(["hash", path_str(&fasta), "--profile-only"])
        .assert()
        .success()
        .stdout(predicate::eq(format!(
            "{ACGT},d41d8cd98f00b204e9800998ecf8427e,{ACGN}\n"
        )));
}

#[test]
fn test_hash_requires_metadata_for_submission_tsv() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "sample.fa", ">a\nACGT\n");

    patinder()
        .args(["hash", path_str(&fasta), "-l", "UK"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--date"));
}

#[test]
fn test_hash_directory_uses_file_stems() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b.fasta", ">x\nACGT\n");
    write(&dir, "a.fasta", ">x\nacgN\n");
    write(&dir, "readme.txt", "not a fasta");

    patinder()
        .args(["hash", path_str(dir.path()), "-d", "2024-05-01", "-l", "UK"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("a\t2024-05-01\tUK\t{ACGN}\n")))
        .stdout(predicate::str::contains(format!("b\t2024-05-01\tUK\t{ACGT}\n")));
}

#[test]
fn test_hash_rejects_bad_date() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "s.fasta", ">x\nACGT\n");

    patinder()
        .args(["hash", path_str(&fasta), "-d", "05/01/2024", "-l", "UK"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid collection date"));
}

#[test]
fn test_query_text_output() {
    let dir = TempDir::new().unwrap();
    let (hash_file, database) = write_fixture(&dir);

    patinder()
        .args(["query", "--hash-file", path_str(&hash_file)])
        .args(["--database", path_str(&database), "--min-score", "0.9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total number of sequences in Patinder: 3"))
        .stdout(predicate::str::contains("1 sequences match the request"))
        .stdout(predicate::str::contains(
            "S_close (2024-01-01, UK), matched 95.00%, submitted by Lab 1 \
             (https://microbioinfo-hackathon.loculus.org/group/1)",
        ))
        .stdout(predicate::str::contains("S_half").not());
}

#[test]
fn test_query_tsv_is_ranked() {
    let dir = TempDir::new().unwrap();
    let (hash_file, database) = write_fixture(&dir);

    let output = patinder()
        .args(["--format", "tsv", "query", "--hash-file", path_str(&hash_file)])
        .args(["--database", path_str(&database), "--min-score", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let ids: Vec<&str> = stdout
        .lines()
        .skip(1)
        .map(|l| l.split('\t').nth(1).unwrap())
        .collect();
    assert_eq!(ids, ["S_close", "S_half", "S_far"]);
}

#[test]
fn test_query_json_output() {
    let dir = TempDir::new().unwrap();
    let (hash_file, database) = write_fixture(&dir);

    let output = patinder()
        .args(["--format", "json", "query", "--hash-file", path_str(&hash_file)])
        .args(["--database", path_str(&database), "--method", "jaccard", "--min-score", "0.5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["database_size"], 3);
    assert_eq!(json["method"], "jaccard");
    // Jaccard: 19/20 and 10/20 pass, 2/20 does not
    assert_eq!(json["match_count"], 2);
    assert_eq!(json["matches"][0]["entry"]["submission_id"], "S_close");
}

#[test]
fn test_query_empty_hash_file_fails() {
    let dir = TempDir::new().unwrap();
    let (_, database) = write_fixture(&dir);
    let empty = write(&dir, "empty.txt", "\n");

    patinder()
        .args(["query", "--hash-file", path_str(&empty), "--database", path_str(&database)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty query profile"));
}

#[test]
fn test_query_rejects_unknown_method() {
    let dir = TempDir::new().unwrap();
    let (hash_file, database) = write_fixture(&dir);

    patinder()
        .args(["query", "--hash-file", path_str(&hash_file)])
        .args(["--database", path_str(&database), "--method", "jacquard"])
        .assert()
        .failure();
}

#[test]
fn test_query_missing_profile_column_fails() {
    let dir = TempDir::new().unwrap();
    let (hash_file, _) = write_fixture(&dir);
    let database = write(&dir, "bad.tsv", "submissionId\tgroupName\nS1\tLab\n");

    patinder()
        .args(["query", "--hash-file", path_str(&hash_file), "--database", path_str(&database)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("column not found"));
}

#[test]
fn test_query_database_from_stdin() {
    let dir = TempDir::new().unwrap();
    let (hash_file, database) = write_fixture(&dir);
    let snapshot = std::fs::read_to_string(&database).unwrap();

    patinder()
        .args(["query", "--hash-file", path_str(&hash_file), "--database", "-"])
        .write_stdin(snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 sequences match the request"));
}

#[test]
fn test_matrix_tsv() {
    let dir = TempDir::new().unwrap();
    let (hash_file, database) = write_fixture(&dir);
    let out = dir.path().join("dist.tsv");

    patinder()
        .args(["matrix", "--hash-file", path_str(&hash_file)])
        .args(["--database", path_str(&database), "--query-name", "Q"])
        .args(["--method", "jaccard", "-o", path_str(&out)])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).unwrap();
    let rows: Vec<Vec<&str>> = content.lines().map(|l| l.split('\t').collect()).collect();
    assert_eq!(rows[0], ["", "Q", "S_half", "S_close", "S_far"]);
    assert_eq!(rows.len(), 5);
    for i in 1..5 {
        assert_eq!(rows[i][i], "0.0000");
        for j in 1..5 {
            assert_eq!(rows[i][j], rows[j][i]);
        }
    }
    // Q vs S_close: 1 - 19/20
    assert_eq!(rows[1][3], "0.0500");
}

#[test]
fn test_placeholder_fasta() {
    let dir = TempDir::new().unwrap();
    let tsv = write(
        &dir,
        "submission.tsv",
        "submissionId\tcollectionDate\tlocation\tprofileHash\nS1\t2024-01-01\tUK\th1\nS2\t2024-01-02\tUK\th2\n",
    );

    patinder()
        .args(["placeholder", path_str(&tsv)])
        .assert()
        .success()
        .stdout(predicate::eq(">S1\nNNN\n>S2\nNNN\n"));
}
