use std::collections::HashSet;
use std::hash::Hash;

use thiserror::Error;

use crate::core::types::ComparisonMethod;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Cannot compute {method} similarity: denominator is zero (empty query profile)")]
    EmptyQuery { method: ComparisonMethod },
}

/// Safely convert usize to f64 for ratio calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// A similarity measure between two digest sets
pub trait Similarity {
    /// Score `candidate` against `query`, in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::EmptyQuery` when the measure's denominator is zero.
    fn similarity<T: Eq + Hash>(
        &self,
        query: &HashSet<T>,
        candidate: &HashSet<T>,
    ) -> Result<f64, ScoreError>;
}

impl Similarity for ComparisonMethod {
    fn similarity<T: Eq + Hash>(
        &self,
        query: &HashSet<T>,
        candidate: &HashSet<T>,
    ) -> Result<f64, ScoreError> {
        match self {
            Self::ProportionMatched => proportion_matched(query, candidate),
            Self::Jaccard => jaccard(query, candidate),
        }
    }
}

/// Score two digest sets with the given method
///
/// # Errors
///
/// Returns `ScoreError::EmptyQuery` when the method's denominator is zero.
pub fn score<T: Eq + Hash>(
    query: &HashSet<T>,
    candidate: &HashSet<T>,
    method: ComparisonMethod,
) -> Result<f64, ScoreError> {
    method.similarity(query, candidate)
}

/// Fraction of the query present in the candidate: |Q ∩ C| / |Q|
///
/// Not symmetric: only the query's size is in the denominator.
///
/// # Errors
///
/// Returns `ScoreError::EmptyQuery` if `query` is empty.
pub fn proportion_matched<T: Eq + Hash>(
    query: &HashSet<T>,
    candidate: &HashSet<T>,
) -> Result<f64, ScoreError> {
    if query.is_empty() {
        return Err(ScoreError::EmptyQuery {
            method: ComparisonMethod::ProportionMatched,
        });
    }
    let shared = intersection_size(query, candidate);
    Ok(count_to_f64(shared) / count_to_f64(query.len()))
}

/// Jaccard similarity: |A ∩ B| / |A ∪ B|
///
/// # Errors
///
/// Returns `ScoreError::EmptyQuery` if both sets are empty.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> Result<f64, ScoreError> {
    let shared = intersection_size(a, b);
    let union = a.len() + b.len() - shared;
    if union == 0 {
        return Err(ScoreError::EmptyQuery {
            method: ComparisonMethod::Jaccard,
        });
    }
    Ok(count_to_f64(shared) / count_to_f64(union))
}

// Iterate the smaller set; the result does not depend on argument order
fn intersection_size<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|x| large.contains(*x)).count()
}
