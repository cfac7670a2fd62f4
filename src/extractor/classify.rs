//! Block Classifier
//!
//! Decides, per candidate block, whether it is an organic result worth
//! extracting. The assembler only sees the [`BlockClassifier`] trait, so the
//! heuristics can be swapped without touching the pipeline.

use dom_query::Selection;

use crate::options::Options;
use crate::selector::discard::{
    self, AD_CONTAINER_RULES, FEATURE_CONTAINER_RULES, HIDDEN_RULES,
};

use super::text::visible_text_len;

/// Why a block was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Paid placement, or carries a visible ad label.
    Advertisement,

    /// Non-organic feature section (Q&A, related searches, carousels).
    SpecialFeature,

    /// Styled or flagged invisible.
    Hidden,

    /// Visible text below the threshold.
    TooShort,
}

/// Classification outcome for one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Reject(RejectReason),
}

impl Verdict {
    #[must_use]
    pub const fn is_keep(self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// Keep/reject decision for a candidate block.
pub trait BlockClassifier {
    fn classify(&self, block: &Selection) -> Verdict;
}

/// Rule-table classifier used by default.
///
/// Ad and feature markers are looked for on the block, its ancestors and its
/// descendants; then visibility; then the visible-text threshold.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicClassifier {
    min_text_len: usize,
}

impl HeuristicClassifier {
    #[must_use]
    pub const fn new(min_text_len: usize) -> Self {
        Self { min_text_len }
    }

    #[must_use]
    pub const fn from_options(options: &Options) -> Self {
        Self::new(options.min_block_text_len)
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

impl BlockClassifier for HeuristicClassifier {
    fn classify(&self, block: &Selection) -> Verdict {
        if discard::self_or_ancestor_matches(block, AD_CONTAINER_RULES)
            || discard::contains_match(block, AD_CONTAINER_RULES)
            || discard::has_visible_ad_label(block)
        {
            return Verdict::Reject(RejectReason::Advertisement);
        }
        if discard::self_or_ancestor_matches(block, FEATURE_CONTAINER_RULES)
            || discard::contains_match(block, FEATURE_CONTAINER_RULES)
        {
            return Verdict::Reject(RejectReason::SpecialFeature);
        }
        if discard::self_or_ancestor_matches(block, HIDDEN_RULES) {
            return Verdict::Reject(RejectReason::Hidden);
        }
        if visible_text_len(block) < self.min_text_len {
            return Verdict::Reject(RejectReason::TooShort);
        }
        Verdict::Keep
    }
}
