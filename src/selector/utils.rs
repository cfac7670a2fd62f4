//! Utility functions for selector pattern matching
//!
//! Attribute access that returns empty strings instead of options, so rules
//! read as flat boolean expressions.

use crate::dom;
use dom_query::{NodeRef, Selection};

// === Element Attribute Helpers ===

/// Get element ID attribute (empty string if missing)
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> String {
    dom::id(sel).unwrap_or_default()
}

/// Get element class attribute (empty string if missing)
#[inline]
#[must_use]
pub fn class(sel: &Selection) -> String {
    dom::class_name(sel).unwrap_or_default()
}

/// Get any attribute (empty string if missing)
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> String {
    dom::get_attribute(sel, name).unwrap_or_default()
}

/// Get tag name (empty string if missing)
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    dom::tag_name(sel).unwrap_or_default()
}

/// Whole-token class check. `has_class(sel, "g")` does not match `class="gx"`.
#[inline]
#[must_use]
pub fn has_class(sel: &Selection, token: &str) -> bool {
    dom::has_class_token(sel, token)
}

/// Whether any class token contains `needle`, ignoring case.
///
/// # Example
///
/// ```rust
/// use serp_proxy::selector::utils;
/// use serp_proxy::dom;
///
/// let doc = dom::parse(r#"<div class="xpdopen kp-no-snippet">x</div>"#);
/// assert!(utils::class_contains(&doc.select("div"), "no-snippet"));
/// assert!(!utils::class_contains(&doc.select("div"), "sponsored"));
/// ```
#[must_use]
pub fn class_contains(sel: &Selection, needle: &str) -> bool {
    lower(&class(sel)).contains(&lower(needle))
}

/// Convert to lowercase
#[inline]
#[must_use]
pub fn lower(s: &str) -> String {
    s.to_lowercase()
}

// === Element Type Checks ===

/// Check if element has a specific tag name
#[inline]
#[must_use]
pub fn is_tag(sel: &Selection, expected: &str) -> bool {
    tag(sel) == expected
}

/// Check if element is one of the specified tags
#[inline]
#[must_use]
pub fn is_one_of_tags(sel: &Selection, tags: &[&str]) -> bool {
    let t = tag(sel);
    tags.contains(&t.as_str())
}

/// Element children of the first node, in order.
#[must_use]
pub fn element_children<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes()
        .first()
        .map(|node| {
            node.children()
                .into_iter()
                .filter(NodeRef::is_element)
                .map(Selection::from)
                .collect()
        })
        .unwrap_or_default()
}
