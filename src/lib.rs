//! # serp-proxy
//!
//! Search-results proxy with a heuristic result-extraction engine.
//!
//! The engine takes the raw markup of a rendered search results page and
//! recovers a bounded, deduplicated list of organic results (title, URL,
//! snippet), skipping paid placements, answer boxes, "People also ask",
//! related searches, carousels and hidden elements. The HTTP side forwards
//! client queries to a paid data-fetching upstream and wraps the engine's
//! output in a JSON envelope.
//!
//! ## Quick Start
//!
//! ```rust
//! use serp_proxy::extract_results;
//!
//! let html = r#"<html><body><div id="rso">
//!   <div class="g">
//!     <a href="/url?q=https://www.rust-lang.org/&sa=U"><h3>Rust Programming Language</h3></a>
//!     <div class="VwiC3b">A language empowering everyone to build reliable and efficient software.</div>
//!   </div>
//! </div></body></html>"#;
//!
//! let results = extract_results(Some(html), "rust");
//! assert_eq!(results.len(), 1);
//! assert_eq!(results.as_slice()[0].url, "https://www.rust-lang.org/");
//! ```
//!
//! ## Guarantees
//!
//! - Never returns an empty set: a placeholder result stands in when nothing
//!   qualifies or the body cannot be loaded.
//! - At most `Options::max_results` results, with pairwise distinct URLs.
//! - Discovery order is preserved.

mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Selector rule tables: candidate blocks, discard patterns, field matchers.
pub mod selector;

/// Extraction pipeline stages.
pub mod extractor;

/// Result URL validation, redirect unwrapping and the destination denylist.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Validated search query.
pub mod query;

/// Process configuration.
pub mod config;

/// Upstream fetch client.
pub mod upstream;

/// HTTP routes and server.
pub mod server;

// Public API - re-exports
pub use config::ProxyConfig;
pub use error::{Error, LoadError, Result};
pub use options::Options;
pub use query::SearchQuery;
pub use result::{
    ExtractedResult, Extraction, ExtractionStats, Outcome, PlaceholderReason, ResultSet,
    ResultSource,
};

/// Extract organic results from raw markup using default options.
///
/// `raw` is `None` when the upstream supplied no body at all.
#[must_use]
pub fn extract_results(raw: Option<&str>, query: &str) -> ResultSet {
    extract_results_with_options(raw, query, &Options::default()).results
}

/// Extract organic results with custom options, returning the full report.
///
/// # Example
///
/// ```rust
/// use serp_proxy::{extract_results_with_options, Options, Outcome, PlaceholderReason};
///
/// let extraction = extract_results_with_options(Some("<html><body></body></html>"), "nothing", &Options::default());
/// assert_eq!(extraction.outcome, Outcome::Placeholder(PlaceholderReason::NoOrganicResults));
/// assert_eq!(extraction.results.len(), 1);
/// ```
#[must_use]
pub fn extract_results_with_options(raw: Option<&str>, query: &str, options: &Options) -> Extraction {
    extractor::pipeline::assemble(raw, query, options)
}

/// Extract organic results from undecoded body bytes.
///
/// The charset comes from a byte-order mark, the `Content-Type` header value,
/// or the document's `<meta>` declarations, in that order; UTF-8 otherwise.
#[must_use]
pub fn extract_results_bytes(
    body: &[u8],
    content_type: Option<&str>,
    query: &str,
    options: &Options,
) -> Extraction {
    let html = encoding::decode_body(body, content_type);
    extract_results_with_options(Some(&html), query, options)
}
