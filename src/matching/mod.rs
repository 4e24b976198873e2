//! Profile comparison: scoring, matching and distance matrices.
//!
//! - [`scoring`]: proportion-matched and Jaccard similarity over digest sets
//! - [`MatchingEngine`](engine::MatchingEngine): filters a database against a
//!   query with an inclusive threshold and ranks the survivors
//! - [`DistanceMatrix`](matrix::DistanceMatrix): symmetric all-vs-all distances
//!
//! ## Scoring
//!
//! | Method | Formula | Symmetric |
//! |--------|---------|-----------|
//! | proportion-matched | \|Q ∩ C\| / \|Q\| | no |
//! | jaccard | \|Q ∩ C\| / \|Q ∪ C\| | yes |
//!
//! A zero denominator is reported as [`ScoreError::EmptyQuery`](scoring::ScoreError)
//! rather than coerced to a score.
//!
//! ## Example
//!
//! ```rust
//! use patinder::{build_profile, MatchingEngine, MatchingConfig, SequenceEntry};
//!
//! let query = build_profile(["ACGT", "GGCC", "TTAA"]).into_set();
//! let database = vec![SequenceEntry::new(
//!     "S1",
//!     build_profile(["ACGT", "GGCC", "TTAT"]).into_set(),
//! )];
//!
//! let config = MatchingConfig { min_score: 0.5, ..MatchingConfig::default() };
//! let engine = MatchingEngine::with_config(&database, config);
//! let matches = engine.find_ranked_matches(&query).unwrap();
//! assert_eq!(matches.len(), 1);
//! ```

pub mod engine;
pub mod matrix;
pub mod scoring;
