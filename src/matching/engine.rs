use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::entry::SequenceEntry;
use crate::core::profile::DigestSet;
use crate::core::types::{ComparisonMethod, Confidence};
use crate::matching::scoring::{score, ScoreError};

/// Result of scoring one database entry against the query
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<'a> {
    /// The matched database entry
    pub entry: &'a SequenceEntry,

    /// Similarity under the configured method, in `[0, 1]`
    pub score: f64,

    /// Confidence level derived from score
    pub confidence: Confidence,
}

impl<'a> MatchResult<'a> {
    pub fn new(entry: &'a SequenceEntry, score: f64) -> Self {
        Self {
            entry,
            score,
            confidence: Confidence::from_score(score),
        }
    }
}

/// Default minimum score for a database entry to count as a match
pub const DEFAULT_MIN_SCORE: f64 = 0.95;

/// Configuration for the matching engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Inclusive score threshold for including matches in results
    pub min_score: f64,
    /// Similarity measure
    pub method: ComparisonMethod,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            method: ComparisonMethod::default(),
        }
    }
}

/// Scores a query against a database snapshot
pub struct MatchingEngine<'a> {
    database: &'a [SequenceEntry],
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    pub fn new(database: &'a [SequenceEntry]) -> Self {
        Self {
            database,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(database: &'a [SequenceEntry], config: MatchingConfig) -> Self {
        Self { database, config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Entries scoring at or above the threshold, in database order
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::EmptyQuery` if any comparison has a zero
    /// denominator. No partial result is returned in that case.
    pub fn find_matches(&self, query: &DigestSet) -> Result<Vec<MatchResult<'a>>, ScoreError> {
        let mut matched = Vec::new();
        for entry in self.database {
            let s = score(query, &entry.profile_hash, self.config.method)?;
            if s >= self.config.min_score {
                matched.push(MatchResult::new(entry, s));
            }
        }

        debug!(
            "{} of {} entries scored >= {} ({})",
            matched.len(),
            self.database.len(),
            self.config.min_score,
            self.config.method
        );
        Ok(matched)
    }

    /// Like [`find_matches`](Self::find_matches), sorted by [`rank`]
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::EmptyQuery` if any comparison has a zero denominator.
    pub fn find_ranked_matches(
        &self,
        query: &DigestSet,
    ) -> Result<Vec<MatchResult<'a>>, ScoreError> {
        let mut matched = self.find_matches(query)?;
        rank(&mut matched);
        Ok(matched)
    }
}

/// Sort by score descending. Equal scores keep their input order.
pub fn rank(results: &mut [MatchResult<'_>]) {
    // sort_by is stable
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
