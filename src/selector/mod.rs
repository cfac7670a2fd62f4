//! Selector Infrastructure
//!
//! Rules are plain predicate functions over a [`Selection`]. The extraction
//! pipeline keeps them in ordered static tables: candidate discovery, block
//! discard (ads, feature sections, hidden elements) and field matching all
//! evaluate their tables in sequence.

use dom_query::Selection;

pub mod candidates;
pub mod discard;
pub mod fields;
pub mod utils;

/// A selector rule that tests if a selection matches certain criteria
pub type Rule = fn(&Selection) -> bool;

/// Query for all elements matching the rule, in document order.
///
/// # Example
///
/// ```rust
/// use serp_proxy::selector::{self, utils};
/// use serp_proxy::dom;
///
/// let doc = dom::parse(r#"<div id="rso"><div class="g">one</div><div class="g">two</div></div>"#);
/// let root = doc.select("#rso");
///
/// fn is_result(sel: &dom_query::Selection) -> bool {
///     utils::has_class(sel, "g")
/// }
///
/// assert_eq!(selector::query_all(&root, is_result).len(), 2);
/// ```
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| rule(sel))
        .collect()
}

/// Whether any rule in the table matches.
#[must_use]
pub fn matches_any(sel: &Selection, rules: &[Rule]) -> bool {
    rules.iter().any(|rule| rule(sel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    fn is_target(sel: &Selection) -> bool {
        utils::has_class(sel, "target")
    }

    #[test]
    fn test_query_all_empty_when_no_match() {
        let doc = dom::parse("<div><p>content</p></div>");
        let root = doc.select("div");

        assert!(query_all(&root, is_target).is_empty());
    }

    #[test]
    fn test_query_all_preserves_document_order() {
        let doc = dom::parse(
            r#"
            <div>
                <p class="target">1</p>
                <section>
                    <p class="target">2</p>
                </section>
                <p class="target">3</p>
            </div>
        "#,
        );
        let root = doc.select("div");

        let results = query_all(&root, is_target);
        assert_eq!(results.len(), 3);
        assert_eq!(dom::text_content(&results[0]), "1".into());
        assert_eq!(dom::text_content(&results[1]), "2".into());
        assert_eq!(dom::text_content(&results[2]), "3".into());
    }

    #[test]
    fn test_matches_any() {
        let doc = dom::parse(r#"<div class="target">x</div><span>y</span>"#);
        fn is_span(sel: &Selection) -> bool {
            utils::is_tag(sel, "span")
        }
        let table: &[Rule] = &[is_target, is_span];

        assert!(matches_any(&doc.select("div"), table));
        assert!(matches_any(&doc.select("span"), table));
        assert!(!matches_any(&doc.select("body"), table));
        assert!(!matches_any(&doc.select("div"), &[]));
    }
}
