use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Similarity measure used to compare two profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMethod {
    /// |query ∩ candidate| / |query|
    #[default]
    #[value(aliases = ["default", "proportion"])]
    ProportionMatched,
    /// |query ∩ candidate| / |query ∪ candidate|
    Jaccard,
}

impl ComparisonMethod {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ProportionMatched => "proportion-matched",
            Self::Jaccard => "jaccard",
        }
    }

    /// True when `score(a, b) == score(b, a)` for every pair of profiles
    #[must_use]
    pub fn is_symmetric(self) -> bool {
        matches!(self, Self::Jaccard)
    }
}

impl std::fmt::Display for ComparisonMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MethodError {
    #[error("Unrecognized comparison method '{0}' (expected 'default', 'proportion-matched' or 'jaccard')")]
    Unrecognized(String),
}

impl FromStr for ComparisonMethod {
    type Err = MethodError;

    /// Unknown selectors are rejected rather than silently mapped to the default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" | "proportion" | "proportion-matched" | "proportion_matched" => {
                Ok(Self::ProportionMatched)
            }
            "jaccard" => Ok(Self::Jaccard),
            _ => Err(MethodError::Unrecognized(s.to_string())),
        }
    }
}

/// Confidence level for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
    Exact,
}

impl Confidence {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 1.0 {
            Self::Exact
        } else if score >= 0.95 {
            Self::High
        } else if score >= 0.80 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}
