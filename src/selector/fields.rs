//! Field Matchers
//!
//! Ordered title and snippet matchers for an accepted result block. Each
//! table is tried in order and the first matcher that succeeds wins.

use dom_query::Selection;

use crate::dom;
use crate::patterns::{HEADING_SELECTOR, SNIPPET_SELECTORS};

/// The link and heading that make up a result title.
#[derive(Debug, Clone)]
pub struct TitleMatch<'a> {
    /// Link carrying the destination href.
    pub link: Selection<'a>,

    /// Heading carrying the visible title text.
    pub heading: Selection<'a>,
}

/// A title matcher: returns the link/heading pair it recognises, if any.
pub type TitleMatcher = for<'a> fn(&Selection<'a>) -> Option<TitleMatch<'a>>;

/// Title matchers, primary pattern first.
pub static TITLE_MATCHERS: &[TitleMatcher] = &[
    link_wrapping_heading,
    heading_wrapping_link,
    first_link_with_nearby_heading,
];

fn has_text(sel: &Selection) -> bool {
    !dom::text_content(sel).trim().is_empty()
}

/// Primary shape: `<a href><h3>Title</h3></a>`.
#[must_use]
pub fn link_wrapping_heading<'a>(block: &Selection<'a>) -> Option<TitleMatch<'a>> {
    block.select("a[href]").iter().find_map(|link| {
        let heading = link.select(HEADING_SELECTOR).first();
        (heading.exists() && has_text(&heading)).then_some(TitleMatch { link, heading })
    })
}

/// Older shape: `<h3><a href>Title</a></h3>`.
#[must_use]
pub fn heading_wrapping_link<'a>(block: &Selection<'a>) -> Option<TitleMatch<'a>> {
    block.select(HEADING_SELECTOR).iter().find_map(|heading| {
        let link = heading.select("a[href]").first();
        (link.exists() && has_text(&heading)).then_some(TitleMatch { link, heading })
    })
}

/// Last resort: the block's first link, titled by a heading next to it
/// (within its parent or grandparent).
#[must_use]
pub fn first_link_with_nearby_heading<'a>(block: &Selection<'a>) -> Option<TitleMatch<'a>> {
    let link = block.select("a[href]").first();
    if !link.exists() {
        return None;
    }
    let block_id = dom::node_id(block);
    let mut scope = dom::parent(&link);
    for _ in 0..2 {
        if !scope.exists() {
            break;
        }
        let heading = scope.select(HEADING_SELECTOR).first();
        if heading.exists() && has_text(&heading) {
            return Some(TitleMatch { link, heading });
        }
        if dom::node_id(&scope) == block_id {
            break;
        }
        scope = dom::parent(&scope);
    }
    None
}

/// Run the title matchers in order.
#[must_use]
pub fn match_title<'a>(block: &Selection<'a>) -> Option<TitleMatch<'a>> {
    TITLE_MATCHERS.iter().find_map(|matcher| matcher(block))
}

/// First known snippet container with text, in selector priority order.
#[must_use]
pub fn match_snippet<'a>(block: &Selection<'a>) -> Option<Selection<'a>> {
    SNIPPET_SELECTORS.iter().find_map(|selector| {
        block
            .select(selector)
            .iter()
            .find(|candidate| has_text(candidate))
    })
}
