//! Block Discard Patterns
//!
//! Identifies paid placements, non-organic feature sections and hidden
//! elements. The ad and feature tables are evaluated against a candidate block,
//! its ancestors and its descendants: a block inside a sponsored region is
//! itself sponsored, and a block wrapping a Q&A widget is the widget.

use dom_query::{NodeId, Selection};

use crate::dom;
use crate::patterns::{
    AD_ARIA_LABEL, AD_LABEL_TEXT, FEATURE_HEADING_TEXT, HIDDEN_STYLE, SNIPPET_SELECTORS,
};
use crate::selector::utils::{attr, class_contains, element_children, has_class, id, is_one_of_tags, tag};
use crate::selector::{self, fields, Rule};

/// Paid placement containers.
pub static AD_CONTAINER_RULES: &[Rule] = &[ad_region_id, ad_marker_class, ad_aria_region];

/// Known non-organic feature containers.
pub static FEATURE_CONTAINER_RULES: &[Rule] = &[
    no_snippet_container,
    accordion_widget,
    carousel_widget,
    feature_heading_section,
];

/// Elements styled or flagged invisible.
pub static HIDDEN_RULES: &[Rule] = &[hidden_style, hidden_attribute, aria_hidden];

/// Longest text an element may carry and still count as an ad label.
const MAX_LABEL_LEN: usize = 24;

// === Ads ===

/// Top and bottom ad blocks: `#tads`, `#tadsb`, `#bottomads`, `#tvcap`.
#[must_use]
pub fn ad_region_id(sel: &Selection) -> bool {
    matches!(id(sel).as_str(), "tads" | "tadsb" | "bottomads" | "tvcap")
}

/// Individual text ads.
#[must_use]
pub fn ad_marker_class(sel: &Selection) -> bool {
    has_class(sel, "uEierd")
        || has_class(sel, "ads-ad")
        || class_contains(sel, "commercial-unit")
        || dom::has_attribute(sel, "data-text-ad")
}

/// Regions announced to assistive tech as advertising.
#[must_use]
pub fn ad_aria_region(sel: &Selection) -> bool {
    AD_ARIA_LABEL.is_match(attr(sel, "aria-label").trim())
}

/// Block carries a visible "Ad" / "Sponsored" label somewhere inside it.
///
/// Only short `span`/`div` elements count, and never ones inside the title
/// link or a snippet container, where query terms show up as plain words.
#[must_use]
pub fn has_visible_ad_label(block: &Selection) -> bool {
    let mut excluded: Vec<NodeId> = block
        .select(&SNIPPET_SELECTORS.join(", "))
        .nodes()
        .iter()
        .map(|n| n.id)
        .collect();
    if let Some(title) = fields::match_title(block) {
        excluded.extend(dom::node_id(&title.link));
    }

    block.select("span, div").iter().any(|el| {
        let text = dom::text_content(&el);
        let text = text.trim();
        !text.is_empty()
            && text.len() <= MAX_LABEL_LEN
            && AD_LABEL_TEXT.is_match(text)
            && !is_within_any(&el, &excluded)
            && !is_hidden_in(&el, block)
    })
}

// === Feature sections ===

/// Answer boxes and similar containers marked as having no snippet.
#[must_use]
pub fn no_snippet_container(sel: &Selection) -> bool {
    class_contains(sel, "no-snippet")
}

/// Q&A expander widgets ("People also ask" and friends).
#[must_use]
pub fn accordion_widget(sel: &Selection) -> bool {
    let tag_val = tag(sel);
    tag_val.starts_with("g-accordion")
        || has_class(sel, "related-question-pair")
        || has_class(sel, "xpdopen")
        || dom::has_attribute(sel, "data-initq")
}

/// Horizontal carousels (videos, top stories).
#[must_use]
pub fn carousel_widget(sel: &Selection) -> bool {
    is_one_of_tags(sel, &["g-scrolling-carousel", "video-voyager", "g-inner-card"])
}

/// A section whose own heading names a feature ("People also ask",
/// "Related searches", "Top stories", "Videos", ...).
#[must_use]
pub fn feature_heading_section(sel: &Selection) -> bool {
    if FEATURE_HEADING_TEXT.is_match(attr(sel, "aria-label").trim()) {
        return true;
    }
    element_children(sel).iter().any(|child| {
        let is_heading = is_one_of_tags(child, &["h1", "h2", "h3", "h4"])
            || attr(child, "role") == "heading";
        is_heading && FEATURE_HEADING_TEXT.is_match(&dom::normalized_text(child))
    })
}

// === Visibility ===

/// Inline `display:none` or `visibility:hidden`.
#[must_use]
pub fn hidden_style(sel: &Selection) -> bool {
    HIDDEN_STYLE.is_match(&attr(sel, "style"))
}

/// HTML `hidden` attribute.
#[must_use]
pub fn hidden_attribute(sel: &Selection) -> bool {
    dom::has_attribute(sel, "hidden")
}

/// `aria-hidden="true"`.
#[must_use]
pub fn aria_hidden(sel: &Selection) -> bool {
    attr(sel, "aria-hidden") == "true"
}

// === Tree checks ===

/// `sel` or any of its ancestors matches a rule in `rules`.
#[must_use]
pub fn self_or_ancestor_matches(sel: &Selection, rules: &[Rule]) -> bool {
    selector::matches_any(sel, rules)
        || dom::ancestors(sel)
            .iter()
            .any(|ancestor| selector::matches_any(ancestor, rules))
}

/// Some element strictly inside `block` matches a rule in `rules`.
#[must_use]
pub fn contains_match(block: &Selection, rules: &[Rule]) -> bool {
    block
        .select("*")
        .iter()
        .any(|el| selector::matches_any(&el, rules))
}

/// `el` is one of `nodes` or lies inside one of them.
fn is_within_any(el: &Selection, nodes: &[NodeId]) -> bool {
    el.nodes()
        .first()
        .is_some_and(|node| nodes.iter().any(|id| node.id == *id || dom::is_inside(node, *id)))
}

/// `el` or an ancestor up to and including `container` is hidden.
fn is_hidden_in(el: &Selection, container: &Selection) -> bool {
    if selector::matches_any(el, HIDDEN_RULES) {
        return true;
    }
    let stop = dom::node_id(container);
    for ancestor in dom::ancestors(el) {
        if selector::matches_any(&ancestor, HIDDEN_RULES) {
            return true;
        }
        if dom::node_id(&ancestor) == stop {
            break;
        }
    }
    false
}
