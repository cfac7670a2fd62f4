//! Field Extractor
//!
//! Recovers title, destination URL and snippet from an accepted block and
//! applies the acceptance gate. Duplicate URLs are the assembler's concern.

use dom_query::{NodeId, Selection};

use crate::dom;
use crate::options::Options;
use crate::patterns::HEADING_SELECTOR;
use crate::result::{ExtractedResult, ResultSource};
use crate::selector::fields::{match_snippet, match_title, TitleMatch};
use crate::url_utils::resolve_result_url;

use super::text::visible_fragments;

/// Why a block produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMiss {
    /// No title matcher recognised the block.
    NoTitle,

    /// Title text too short.
    ShortTitle,

    /// Href missing, not absolute http(s), or a denied destination.
    BadUrl,

    /// Snippet text too short, even after reconstruction.
    ShortSnippet,
}

/// Extract and validate the fields of one block.
pub fn extract_fields(block: &Selection, options: &Options) -> Result<ExtractedResult, FieldMiss> {
    let TitleMatch { link, heading } = match_title(block).ok_or(FieldMiss::NoTitle)?;

    let title = dom::normalized_text(&heading);
    if title.chars().count() <= options.min_title_len {
        return Err(FieldMiss::ShortTitle);
    }

    let url = link
        .attr("href")
        .and_then(|href| resolve_result_url(href.trim()))
        .ok_or(FieldMiss::BadUrl)?;

    let snippet = match match_snippet(block) {
        Some(container) => truncate_chars(&dom::normalized_text(&container), options.max_snippet_len),
        None => reconstruct_snippet(block, &link, options),
    };
    if snippet.chars().count() <= options.min_snippet_len {
        return Err(FieldMiss::ShortSnippet);
    }

    Ok(ExtractedResult {
        title,
        url,
        snippet,
        source: ResultSource::Organic,
    })
}

/// Rebuild a snippet from the block's longer visible text fragments, leaving
/// out the title link and every heading.
#[must_use]
pub fn reconstruct_snippet(block: &Selection, link: &Selection, options: &Options) -> String {
    let mut excluded: Vec<NodeId> = dom::node_id(link).into_iter().collect();
    excluded.extend(block.select(HEADING_SELECTOR).nodes().iter().map(|n| n.id));

    let joined = visible_fragments(block, &excluded)
        .into_iter()
        .filter(|fragment| fragment.chars().count() > options.min_fragment_len)
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(&joined, options.max_snippet_len)
}

/// Cut `text` to at most `max` characters, on a char boundary.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].trim_end().to_string(),
        None => text.to_string(),
    }
}
