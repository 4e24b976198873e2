use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{read_database, OutputFormat};
use crate::core::types::{ComparisonMethod, Confidence};
use crate::matching::engine::{MatchResult, MatchingConfig, MatchingEngine, DEFAULT_MIN_SCORE};
use crate::parsing::hashes::read_hash_file;

/// Default site used to link submitting groups
pub const DEFAULT_WEBSITE: &str = "https://microbioinfo-hackathon.loculus.org";

#[derive(Args)]
pub struct QueryArgs {
    /// Path to a file with a comma-separated list of hashes
    #[arg(long, required = true)]
    pub hash_file: PathBuf,

    /// Database snapshot TSV (use '-' for stdin)
    #[arg(long, required = true)]
    pub database: PathBuf,

    /// Minimal score for an entry to match, between 0 and 1
    #[arg(
        long,
        visible_alias = "min-proportion-matched",
        default_value_t = DEFAULT_MIN_SCORE,
        value_parser = parse_unit_interval
    )]
    pub min_score: f64,

    /// Similarity measure
    #[arg(long, value_enum, default_value = "proportion-matched")]
    pub method: ComparisonMethod,

    /// Base URL used to link submitting groups
    #[arg(long, default_value = DEFAULT_WEBSITE)]
    pub website: String,
}

fn parse_unit_interval(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not between 0 and 1"))
    }
}

/// Execute query subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be read or the query profile is empty.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: QueryArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if matches!(format, OutputFormat::Text) {
        println!(
            "Querying Patinder data with a minimal score of {:.2}% ({})",
            args.min_score * 100.0,
            args.method
        );
    }

    let query = read_hash_file(&args.hash_file)
        .with_context(|| format!("Failed to read hash file {}", args.hash_file.display()))?;
    if verbose {
        eprintln!("Query profile has {} distinct loci", query.len());
    }

    let database = read_database(&args.database)?;

    let config = MatchingConfig {
        min_score: args.min_score,
        method: args.method,
    };
    let engine = MatchingEngine::with_config(&database, config);
    let matches = engine.find_ranked_matches(&query)?;

    match format {
        OutputFormat::Text => print_text_results(&matches, database.len(), &args.website),
        OutputFormat::Json => print_json_results(&matches, database.len(), engine.config())?,
        OutputFormat::Tsv => print_tsv_results(&matches),
    }

    Ok(())
}

fn print_text_results(matches: &[MatchResult], database_size: usize, website: &str) {
    println!("Total number of sequences in Patinder: {database_size}");
    println!("{} sequences match the request", matches.len());

    let website = website.trim_end_matches('/');
    for m in matches {
        let marker = match m.confidence {
            Confidence::Exact => " [EXACT]",
            _ => "",
        };
        println!(
            "{} ({}, {}), matched {:.2}%{marker}, submitted by {} ({website}/group/{})",
            m.entry.submission_id,
            m.entry.collection_date,
            m.entry.location,
            m.score * 100.0,
            m.entry.group_name,
            m.entry.group_id,
        );
    }
}

fn print_json_results(
    matches: &[MatchResult],
    database_size: usize,
    config: &MatchingConfig,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "method": config.method,
        "min_score": config.min_score,
        "database_size": database_size,
        "match_count": matches.len(),
        "matches": matches,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(matches: &[MatchResult]) {
    println!(
        "rank\tsubmissionId\tscore\tconfidence\tcollectionDate\tlocation\tgroupName\tgroupId"
    );
    for (i, m) in matches.iter().enumerate() {
        println!(
            "{}\t{}\t{:.4}\t{:?}\t{}\t{}\t{}\t{}",
            i + 1,
            m.entry.submission_id,
            m.score,
            m.confidence,
            m.entry.collection_date,
            m.entry.location,
            m.entry.group_name,
            m.entry.group_id,
        );
    }
}
