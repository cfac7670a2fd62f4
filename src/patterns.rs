//! Compiled regex patterns and CSS selectors for result extraction.
//!
//! All patterns are compiled once at first use via `LazyLock`.
//! Patterns are organized by the pipeline stage that uses them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Document Loading
// =============================================================================

/// Matches anything that looks like the start of a tag, comment, or doctype.
pub static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:[a-zA-Z][a-zA-Z0-9-]*|!|/[a-zA-Z])").expect("MARKUP_TAG regex")
});

// =============================================================================
// Block Classification
// =============================================================================

/// Visible labels the results page puts on paid placements.
///
/// Matched against the whole trimmed text of a small element, so "Ad" inside a
/// sentence never triggers it.
pub static AD_LABEL_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:ad|ads|sponsored|sponsored results?|sponsored links?)\s*[·•:]?$")
        .expect("AD_LABEL_TEXT regex")
});

/// Headings that label non-organic feature sections.
pub static FEATURE_HEADING_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:people also ask|related searches|people also search for|top stories|videos|short videos|things to know|related questions|questions & answers)$",
    )
    .expect("FEATURE_HEADING_TEXT regex")
});

/// aria-label values of advertising regions.
pub static AD_ARIA_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:ads?|sponsored|sponsored results?|advertisements?)$")
        .expect("AD_ARIA_LABEL regex")
});

/// Inline styles that suppress rendering.
pub static HIDDEN_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)display\s*:\s*none|visibility\s*:\s*hidden").expect("HIDDEN_STYLE regex")
});

// =============================================================================
// Field Extraction
// =============================================================================

/// Hosts belonging to the search engine itself (any country TLD).
pub static SEARCH_ENGINE_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z0-9-]+\.)*google\.(?:[a-z]{2,3})(?:\.[a-z]{2})?$")
        .expect("SEARCH_ENGINE_HOST regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

/// Matches any tag, for stripping markup out of regex-captured fragments.
pub static TAG_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("TAG_STRIP regex"));

// =============================================================================
// Degraded Fallback Patterns
// =============================================================================

/// Matches `<a href="…">` followed (after optional wrapper tags) by an `<h3>` title.
///
/// Capture 1 is the raw href, capture 2 the heading's inner markup.
pub static RESULT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']+)["'][^>]*>\s*(?:<[^>]+>\s*)*<h3[^>]*>(.*?)</h3>"#,
    )
    .expect("RESULT_LINK regex")
});

// =============================================================================
// CSS Selectors
// =============================================================================

/// Snippet containers, most specific first.
pub const SNIPPET_SELECTORS: &[&str] = &[
    "div.VwiC3b",
    "span.aCOpRe",
    "div.IsZvec",
    "div.s3v9rd",
    "div.lEBKkf",
    "div[data-sncf]",
    "div[style*='-webkit-line-clamp']",
    "span.st",
];

/// Elements whose text never contributes to a rebuilt snippet.
pub const NON_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg"];

/// Heading elements accepted as result titles.
pub const HEADING_SELECTOR: &str = "h3, h2, h4, [role='heading']";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_tag_detects_markup() {
        assert!(MARKUP_TAG.is_match("<html><body></body></html>"));
        assert!(MARKUP_TAG.is_match("<!DOCTYPE html>"));
        assert!(MARKUP_TAG.is_match("text then <div>"));
        assert!(!MARKUP_TAG.is_match(r#"{"error": "zone not found"}"#));
        assert!(!MARKUP_TAG.is_match("a < b and c > d"));
    }

    #[test]
    fn ad_label_matches_whole_labels_only() {
        assert!(AD_LABEL_TEXT.is_match("Ad"));
        assert!(AD_LABEL_TEXT.is_match("Sponsored"));
        assert!(AD_LABEL_TEXT.is_match("Ad ·"));
        assert!(!AD_LABEL_TEXT.is_match("Add to cart"));
        assert!(!AD_LABEL_TEXT.is_match("Advanced Rust"));
    }

    #[test]
    fn feature_heading_matches_known_sections() {
        assert!(FEATURE_HEADING_TEXT.is_match("People also ask"));
        assert!(FEATURE_HEADING_TEXT.is_match("Related searches"));
        assert!(FEATURE_HEADING_TEXT.is_match("Top stories"));
        assert!(FEATURE_HEADING_TEXT.is_match("Videos"));
        assert!(!FEATURE_HEADING_TEXT.is_match("Videos of rust programming"));
    }

    #[test]
    fn hidden_style_matches_suppressed_display() {
        assert!(HIDDEN_STYLE.is_match("display:none"));
        assert!(HIDDEN_STYLE.is_match("color: red; display : none"));
        assert!(HIDDEN_STYLE.is_match("visibility:hidden"));
        assert!(!HIDDEN_STYLE.is_match("display:block"));
    }

    #[test]
    fn search_engine_host_matches_country_domains() {
        assert!(SEARCH_ENGINE_HOST.is_match("www.google.com"));
        assert!(SEARCH_ENGINE_HOST.is_match("google.co.uk"));
        assert!(SEARCH_ENGINE_HOST.is_match("maps.google.de"));
        assert!(!SEARCH_ENGINE_HOST.is_match("notgoogle.com"));
        assert!(!SEARCH_ENGINE_HOST.is_match("www.rust-lang.org"));
    }

    #[test]
    fn result_link_captures_href_and_title() {
        let html = r#"<a href="https://example.com/page" data-ved="x"><br><h3 class="LC20lb">Example <b>Page</b></h3></a>"#;
        let caps = RESULT_LINK.captures(html);
        assert!(caps.is_some());
        if let Some(caps) = caps {
            assert_eq!(&caps[1], "https://example.com/page");
            assert_eq!(&caps[2], "Example <b>Page</b>");
        }
    }

    #[test]
    fn whitespace_normalize_collapses_spaces() {
        let result = WHITESPACE_NORMALIZE.replace_all("hello \n\t  world", " ");
        assert_eq!(result, "hello world");
    }
}
