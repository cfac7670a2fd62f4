//! Candidate Block Patterns
//!
//! Structural shapes of organic result containers on a results page, most
//! specific first. Every match is classified independently afterwards, so a
//! loose pattern here costs time, not correctness.

use dom_query::Selection;

use crate::dom;
use crate::selector::utils::{has_class, id, is_tag};
use crate::selector::{self, Rule};

/// Result container patterns in priority order.
pub static RESULT_BLOCK_RULES: &[Rule] = &[
    tf2cxc_result,
    classic_result,
    mjjyud_wrapper,
    hlcw0c_group,
    rso_child,
];

/// Current single-result body: `div.tF2Cxc`.
#[must_use]
pub fn tf2cxc_result(sel: &Selection) -> bool {
    has_class(sel, "tF2Cxc")
}

/// Long-standing result container: `div.g`.
#[must_use]
pub fn classic_result(sel: &Selection) -> bool {
    is_tag(sel, "div") && has_class(sel, "g")
}

/// Outer wrapper introduced with the continuous-scroll layout: `div.MjjYud`.
#[must_use]
pub fn mjjyud_wrapper(sel: &Selection) -> bool {
    has_class(sel, "MjjYud")
}

/// Grouped listing that bundles several results from one site: `div.hlcw0c`.
#[must_use]
pub fn hlcw0c_group(sel: &Selection) -> bool {
    has_class(sel, "hlcw0c")
}

/// Any direct `div` child of the results list `#rso`.
#[must_use]
pub fn rso_child(sel: &Selection) -> bool {
    is_tag(sel, "div") && id(&dom::parent(sel)) == "rso"
}

/// Number of title links (a link wrapping a heading, or a heading wrapping a
/// link) inside `sel`.
#[must_use]
pub fn title_link_count(sel: &Selection) -> usize {
    sel.select("a h3").length() + sel.select("h3 a").length()
}

/// Whether `sel` matches any result container pattern.
#[must_use]
pub fn is_result_block(sel: &Selection) -> bool {
    selector::matches_any(sel, RESULT_BLOCK_RULES)
}

/// Select candidate result blocks under `root`, in document order.
///
/// A match nested inside an already selected block is skipped. A match that
/// holds two or more title links and also contains further matches is a group
/// wrapper: it is dropped and its inner matches are kept instead.
#[must_use]
pub fn discover<'a>(root: &Selection<'a>) -> Vec<Selection<'a>> {
    let matches = selector::query_all(root, is_result_block);
    let nodes: Vec<dom::NodeRef<'a>> = matches
        .iter()
        .filter_map(|sel| sel.nodes().first().copied())
        .collect();

    let mut kept: Vec<Selection<'a>> = Vec::new();
    let mut kept_ids: Vec<dom::NodeId> = Vec::new();

    for sel in matches {
        let Some(node) = sel.nodes().first().copied() else {
            continue;
        };
        if kept_ids.iter().any(|k| dom::is_inside(&node, *k)) {
            continue;
        }
        let contains_other = nodes.iter().any(|other| dom::is_inside(other, node.id));
        if contains_other && title_link_count(&sel) >= 2 {
            continue;
        }
        kept_ids.push(node.id);
        kept.push(sel);
    }

    kept
}
