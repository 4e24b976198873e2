use std::io::Write;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::core::entry::SequenceEntry;
use crate::core::profile::DigestSet;
use crate::core::types::ComparisonMethod;
use crate::matching::scoring::{score, ScoreError};

/// Symmetric all-vs-all distance matrix over `{query} ∪ database`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    /// Row/column labels: query name first, then submission ids in input order
    pub labels: Vec<String>,

    /// Row-major `N×N` distances, `1 - similarity`
    pub distances: Vec<Vec<f64>>,

    /// Method used for every cell
    pub method: ComparisonMethod,
}

impl DistanceMatrix {
    /// Build the matrix for a named query and a database snapshot.
    ///
    /// Each unordered pair `(i, j)` with `i < j` is scored once, as
    /// `score(profile_i, profile_j)`, and written to both `(i, j)` and `(j, i)`.
    /// The diagonal is `0.0` without consulting the scorer.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::EmptyQuery` if any pair has a zero denominator.
    pub fn build(
        query_name: &str,
        query: &DigestSet,
        database: &[SequenceEntry],
        method: ComparisonMethod,
    ) -> Result<Self, ScoreError> {
        let labels: Vec<String> = std::iter::once(query_name.to_string())
            .chain(database.iter().map(|e| e.submission_id.clone()))
            .collect();
        let profiles: Vec<&DigestSet> = std::iter::once(query)
            .chain(database.iter().map(|e| &e.profile_hash))
            .collect();
        let n = profiles.len();

        debug!(
            "Computing {n}x{n} distance matrix ({} comparisons, {method})",
            n * (n - 1) / 2
        );

        // Workers own disjoint (i, j) pairs; results are written back afterwards
        let upper_triangle: Vec<(usize, usize, f64)> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| (i + 1..n).map(move |j| (i, j)))
            .map(|(i, j)| score(profiles[i], profiles[j], method).map(|s| (i, j, 1.0 - s)))
            .collect::<Result<_, _>>()?;

        let mut distances = vec![vec![0.0; n]; n];
        for (i, j, d) in upper_triangle {
            distances[i][j] = d;
            distances[j][i] = d;
        }

        Ok(Self {
            labels,
            distances,
            method,
        })
    }

    /// Number of rows (and columns)
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[i][j]
    }

    /// Write as TSV: a header row with an empty corner cell followed by the
    /// labels, then one labelled row per entry with cells to 4 decimals.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_tsv<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for label in &self.labels {
            write!(out, "\t{label}")?;
        }
        writeln!(out)?;

        for (label, row) in self.labels.iter().zip(&self.distances) {
            write!(out, "{label}")?;
            for d in row {
                write!(out, "\t{d:.4}")?;
            }
            writeln!(out)?;
        }
        out.flush()
    }
}
