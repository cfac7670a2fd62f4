//! Result Assembler
//!
//! Drives one extraction call: load, discover, classify, extract, dedup and
//! cap. Never returns an empty set; when nothing qualifies a single
//! placeholder result describing the failure takes its place.

use std::collections::HashSet;

use crate::error::LoadError;
use crate::options::Options;
use crate::result::{
    ExtractedResult, Extraction, ExtractionStats, Outcome, PlaceholderReason, ResultSet,
    ResultSource,
};
use crate::selector::candidates;
use crate::url_utils::{normalize_url, search_page_url};

use super::classify::{BlockClassifier, HeuristicClassifier, RejectReason, Verdict};
use super::fields::extract_fields;
use super::loader::load_document;

/// Run the pipeline with the default heuristic classifier.
#[must_use]
pub fn assemble(raw: Option<&str>, query: &str, options: &Options) -> Extraction {
    assemble_with(raw, query, options, &HeuristicClassifier::from_options(options))
}

/// Run the pipeline with a caller-supplied classifier.
#[must_use]
pub fn assemble_with(
    raw: Option<&str>,
    query: &str,
    options: &Options,
    classifier: &dyn BlockClassifier,
) -> Extraction {
    let mut stats = ExtractionStats::default();

    let doc = match load_document(raw) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::debug!(error = %err, "document load failed");
            return placeholder_extraction(query, PlaceholderReason::LoadFailed(err), stats);
        }
    };

    let root = doc.select("html");
    let blocks = candidates::discover(&root);
    stats.candidates = blocks.len();

    let mut seen: HashSet<String> = HashSet::new();
    let mut results: Vec<ExtractedResult> = Vec::new();

    for block in &blocks {
        if results.len() >= options.max_results {
            break;
        }
        stats.evaluated += 1;

        match classifier.classify(block) {
            Verdict::Keep => {}
            Verdict::Reject(reason) => {
                tracing::debug!(?reason, "candidate block rejected");
                match reason {
                    RejectReason::Advertisement => stats.rejected_ads += 1,
                    RejectReason::SpecialFeature => stats.rejected_features += 1,
                    RejectReason::Hidden => stats.rejected_hidden += 1,
                    RejectReason::TooShort => stats.rejected_short += 1,
                }
                continue;
            }
        }

        let result = match extract_fields(block, options) {
            Ok(result) => result,
            Err(miss) => {
                tracing::debug!(?miss, "block dropped at field extraction");
                stats.dropped_fields += 1;
                continue;
            }
        };

        if !seen.insert(normalize_url(&result.url)) {
            stats.duplicates += 1;
            continue;
        }
        results.push(result);
    }

    if !results.is_empty() {
        return Extraction {
            results: ResultSet::from_vec(results),
            outcome: Outcome::Organic,
            stats,
        };
    }

    #[cfg(feature = "regex-fallback")]
    if options.regex_fallback {
        if let Some(raw) = raw {
            let block_ids: Vec<crate::dom::NodeId> =
                blocks.iter().filter_map(crate::dom::node_id).collect();
            let degraded = super::fallback::scan_raw_markup(raw, options, |href| {
                !link_is_excluded(&root, &block_ids, href)
            });
            if !degraded.is_empty() {
                return Extraction {
                    results: ResultSet::from_vec(degraded),
                    outcome: Outcome::Degraded,
                    stats,
                };
            }
        }
    }

    placeholder_extraction(query, PlaceholderReason::NoOrganicResults, stats)
}

/// Whether the regex scan must skip this href.
///
/// Links inside a discovered candidate block already had their verdict from
/// the tree pipeline and are never recovered. Links found only inside ad,
/// feature or hidden containers are skipped too. Hrefs the tree does not know
/// are accepted.
#[cfg(feature = "regex-fallback")]
fn link_is_excluded(root: &dom_query::Selection, blocks: &[crate::dom::NodeId], href: &str) -> bool {
    use crate::dom;
    use crate::selector::discard::{
        self_or_ancestor_matches, AD_CONTAINER_RULES, FEATURE_CONTAINER_RULES, HIDDEN_RULES,
    };

    let links: Vec<dom_query::Selection> = root
        .select("a[href]")
        .iter()
        .filter(|a| a.attr("href").is_some_and(|h| h.trim() == href.trim()))
        .collect();

    let in_block = links.iter().any(|a| {
        a.nodes()
            .first()
            .is_some_and(|node| blocks.iter().any(|b| dom::is_inside(node, *b)))
    });
    if in_block {
        return true;
    }

    !links.is_empty()
        && links.iter().all(|a| {
            self_or_ancestor_matches(a, AD_CONTAINER_RULES)
                || self_or_ancestor_matches(a, FEATURE_CONTAINER_RULES)
                || self_or_ancestor_matches(a, HIDDEN_RULES)
        })
}

/// The synthetic result standing in for an empty set.
#[must_use]
pub fn placeholder(query: &str, reason: PlaceholderReason) -> ExtractedResult {
    let query = query.trim();
    let (title, snippet) = match reason {
        PlaceholderReason::LoadFailed(err) => (
            format!("Search results for \"{query}\" are unavailable"),
            format!(
                "The results page for \"{query}\" could not be read ({}). Open the search link to view results directly.",
                describe_load_error(err)
            ),
        ),
        PlaceholderReason::NoOrganicResults => (
            format!("No organic results found for \"{query}\""),
            format!(
                "No organic results could be extracted for \"{query}\". Open the search link to view results directly."
            ),
        ),
    };

    ExtractedResult {
        title,
        url: search_page_url(query),
        snippet,
        source: ResultSource::Placeholder,
    }
}

const fn describe_load_error(err: LoadError) -> &'static str {
    match err {
        LoadError::Missing => "no response body",
        LoadError::Empty => "empty response body",
        LoadError::NotMarkup => "response was not markup",
    }
}

fn placeholder_extraction(
    query: &str,
    reason: PlaceholderReason,
    stats: ExtractionStats,
) -> Extraction {
    Extraction {
        results: ResultSet::from_vec(vec![placeholder(query, reason)]),
        outcome: Outcome::Placeholder(reason),
        stats,
    }
}
