//! Result types for extraction output.
//!
//! This module defines the structured output of the extraction engine: the
//! individual results, the bounded result set, and the report describing how
//! the set was produced.

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Where an [`ExtractedResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultSource {
    /// Recovered by the tree-based pipeline from an organic result block.
    #[serde(rename = "brightdata")]
    Organic,

    /// Recovered by the regex scan over raw markup.
    #[serde(rename = "brightdata-regex")]
    Degraded,

    /// Synthetic entry standing in for an empty result set.
    #[serde(rename = "fallback")]
    Placeholder,
}

impl ResultSource {
    /// Stable label used in logs and JSON output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Organic => "brightdata",
            Self::Degraded => "brightdata-regex",
            Self::Placeholder => "fallback",
        }
    }
}

/// A single search result with title, URL, and snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedResult {
    /// Result title (always longer than the configured minimum).
    pub title: String,

    /// Absolute http(s) destination URL, unique within its result set.
    pub url: String,

    /// Short description of the destination.
    pub snippet: String,

    /// How this result was produced.
    pub source: ResultSource,
}

/// Ordered, bounded, never-empty sequence of results.
///
/// Insertion order is discovery order. URLs are pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<ExtractedResult>);

impl ResultSet {
    pub(crate) fn from_vec(results: Vec<ExtractedResult>) -> Self {
        Self(results)
    }

    /// Number of results in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for sets built by the assembler.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Results as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ExtractedResult] {
        &self.0
    }

    /// Iterate over the results in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExtractedResult> {
        self.0.iter()
    }

    /// Consume the set, returning the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<ExtractedResult> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ExtractedResult;
    type IntoIter = std::slice::Iter<'a, ExtractedResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Why the assembler fell back to a placeholder result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderReason {
    /// The Document Loader rejected the raw body.
    LoadFailed(LoadError),

    /// The document loaded but nothing survived classification and extraction.
    NoOrganicResults,
}

/// How a result set was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Organic results from the tree-based pipeline.
    Organic,

    /// Results from the regex scan over raw markup.
    Degraded,

    /// A single placeholder result.
    Placeholder(PlaceholderReason),
}

impl Outcome {
    /// Source label shared by every result this outcome produces.
    #[must_use]
    pub const fn source(self) -> ResultSource {
        match self {
            Self::Organic => ResultSource::Organic,
            Self::Degraded => ResultSource::Degraded,
            Self::Placeholder(_) => ResultSource::Placeholder,
        }
    }
}

/// Counters collected while assembling a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Candidate blocks found by discovery.
    pub candidates: usize,

    /// Candidates actually evaluated before the result cap was reached.
    pub evaluated: usize,

    /// Rejected as paid placements.
    pub rejected_ads: usize,

    /// Rejected as non-organic feature sections.
    pub rejected_features: usize,

    /// Rejected as invisible.
    pub rejected_hidden: usize,

    /// Rejected for too little visible text.
    pub rejected_short: usize,

    /// Accepted by the classifier but dropped at the field acceptance gate.
    pub dropped_fields: usize,

    /// Dropped because the URL was already in the set.
    pub duplicates: usize,
}

/// Full output of one extraction call.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The result set (never empty).
    pub results: ResultSet,

    /// How the set was produced.
    pub outcome: Outcome,

    /// Pipeline counters.
    pub stats: ExtractionStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExtractedResult {
        ExtractedResult {
            title: "Rust Programming Language".into(),
            url: "https://www.rust-lang.org/".into(),
            snippet: "A language empowering everyone.".into(),
            source: ResultSource::Organic,
        }
    }

    #[test]
    fn source_serializes_as_label() {
        for source in [
            ResultSource::Organic,
            ResultSource::Degraded,
            ResultSource::Placeholder,
        ] {
            let json = serde_json::to_string(&source).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", source.label()));
        }
    }

    #[test]
    fn result_set_serializes_as_array() {
        let set = ResultSet::from_vec(vec![sample()]);
        let value = serde_json::to_value(&set).unwrap_or_default();
        let arr = value.as_array().cloned().unwrap_or_default();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["url"], "https://www.rust-lang.org/");
        assert_eq!(arr[0]["source"], "brightdata");
    }

    #[test]
    fn outcome_source_labels() {
        assert_eq!(Outcome::Organic.source().label(), "brightdata");
        assert_eq!(Outcome::Degraded.source().label(), "brightdata-regex");
        assert_eq!(
            Outcome::Placeholder(PlaceholderReason::NoOrganicResults).source(),
            ResultSource::Placeholder
        );
    }

    #[test]
    fn result_set_accessors() {
        let set = ResultSet::from_vec(vec![sample()]);
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
        assert_eq!(set.iter().count(), 1);
        assert_eq!(set.as_slice()[0].title, "Rust Programming Language");
        assert_eq!(set.into_vec().len(), 1);
    }
}
