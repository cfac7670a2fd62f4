//! Document Loader
//!
//! Turns the raw upstream body into a queryable tree. The HTML5 tree builder
//! accepts any input, so "not markup" means the body has no tag-like sequence
//! at all: a JSON error payload or a plain-text notice from the upstream.

use dom_query::Document;

use crate::dom;
use crate::error::LoadError;
use crate::patterns::MARKUP_TAG;

/// Parse a raw body into a document.
///
/// # Examples
///
/// ```
/// use serp_proxy::extractor::loader::load_document;
/// use serp_proxy::LoadError;
///
/// assert!(load_document(Some("<html><body><div id=\"rso\"></div></body></html>")).is_ok());
/// assert_eq!(load_document(None).err(), Some(LoadError::Missing));
/// assert_eq!(load_document(Some("  \n")).err(), Some(LoadError::Empty));
/// assert_eq!(load_document(Some("rate limited")).err(), Some(LoadError::NotMarkup));
/// ```
pub fn load_document(raw: Option<&str>) -> Result<Document, LoadError> {
    let raw = raw.ok_or(LoadError::Missing)?;
    if raw.trim().is_empty() {
        return Err(LoadError::Empty);
    }
    if !MARKUP_TAG.is_match(raw) {
        return Err(LoadError::NotMarkup);
    }
    Ok(dom::parse(raw))
}
