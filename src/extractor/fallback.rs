//! Degraded Regex Fallback
//!
//! A scan over the raw markup for `<a href><h3>` pairs, used only when the
//! tree pipeline produced nothing from a document that did load. Results go
//! through the same URL resolution and title gate; snippets are rarely
//! recoverable this way, so a fixed text stands in.

use std::collections::HashSet;

use crate::dom::normalize_whitespace;
use crate::options::Options;
use crate::patterns::{RESULT_LINK, TAG_STRIP};
use crate::result::{ExtractedResult, ResultSource};
use crate::url_utils::{normalize_url, resolve_result_url};

/// Snippet used for every regex-recovered result.
pub const NO_DESCRIPTION: &str = "No description available for this result.";

/// Decode the handful of entities that show up in titles.
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
}

/// Scan raw markup for result links.
///
/// `accept_link` sees each entity-decoded href before it is resolved and can
/// veto it (the pipeline uses this to skip links inside ad, feature or hidden
/// containers). Stops at `options.max_results`; URLs are unique by their
/// normalized form.
#[must_use]
pub fn scan_raw_markup(
    raw: &str,
    options: &Options,
    accept_link: impl Fn(&str) -> bool,
) -> Vec<ExtractedResult> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut results = Vec::new();

    for caps in RESULT_LINK.captures_iter(raw) {
        if results.len() >= options.max_results {
            break;
        }
        let (Some(href), Some(title_markup)) = (caps.get(1), caps.get(2)) else {
            continue;
        };

        let title = normalize_whitespace(&decode_entities(&TAG_STRIP.replace_all(title_markup.as_str(), " ")));
        if title.chars().count() <= options.min_title_len {
            continue;
        }

        let href = decode_entities(href.as_str());
        if !accept_link(&href) {
            continue;
        }
        let Some(url) = resolve_result_url(&href) else {
            continue;
        };
        if !seen.insert(normalize_url(&url)) {
            continue;
        }

        results.push(ExtractedResult {
            title,
            url,
            snippet: NO_DESCRIPTION.to_string(),
            source: ResultSource::Degraded,
        });
    }

    tracing::debug!(found = results.len(), "regex fallback scan finished");
    results
}
