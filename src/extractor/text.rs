//! Visible text helpers shared by the classifier and the field extractor.

use dom_query::{NodeId, NodeRef, Selection};

use crate::dom;
use crate::patterns::NON_TEXT_TAGS;
use crate::selector::{self, discard::HIDDEN_RULES};

/// Whether a text node is rendered: not under a non-text element and not
/// under a hidden one, checked up to (and including) `block`.
fn is_visible_text(node: &NodeRef, block: NodeId) -> bool {
    for ancestor in node.ancestors(None) {
        if !ancestor.is_element() {
            continue;
        }
        let sel = Selection::from(ancestor);
        if let Some(tag) = dom::tag_name(&sel) {
            if NON_TEXT_TAGS.contains(&tag.as_str()) {
                return false;
            }
        }
        if selector::matches_any(&sel, HIDDEN_RULES) {
            return false;
        }
        if ancestor.id == block {
            break;
        }
    }
    true
}

/// Whitespace-normalized visible text fragments of `block`, one per text node,
/// in document order. Text under any node in `excluded` is skipped.
#[must_use]
pub fn visible_fragments(block: &Selection, excluded: &[NodeId]) -> Vec<String> {
    let Some(root) = block.nodes().first() else {
        return Vec::new();
    };
    root.descendants()
        .into_iter()
        .filter(|node| node.is_text())
        .filter(|node| !excluded.iter().any(|ex| dom::is_inside(node, *ex)))
        .filter(|node| is_visible_text(node, root.id))
        .map(|node| dom::normalize_whitespace(&node.text()))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Character count of the block's visible text.
#[must_use]
pub fn visible_text_len(block: &Selection) -> usize {
    visible_fragments(block, &[])
        .iter()
        .map(|fragment| fragment.chars().count())
        .sum()
}
