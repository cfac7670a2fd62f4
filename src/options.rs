//! Configuration options for result extraction.
//!
//! The `Options` struct holds the thresholds the extraction engine applies
//! when deciding whether a block is an organic result and whether its fields
//! are good enough to keep.

/// Configuration options for result extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use serp_proxy::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     max_results: 5,
///     regex_fallback: false,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum number of results in a result set.
    ///
    /// The assembler stops evaluating candidates once this many are collected.
    ///
    /// Default: `10`
    pub max_results: usize,

    /// Minimum visible text length (characters) for a candidate block.
    ///
    /// Blocks shorter than this are too small to be a genuine organic result.
    ///
    /// Default: `50`
    pub min_block_text_len: usize,

    /// Titles must be strictly longer than this (characters).
    ///
    /// Default: `3`
    pub min_title_len: usize,

    /// Snippets must be strictly longer than this (characters).
    ///
    /// Default: `10`
    pub min_snippet_len: usize,

    /// Text fragments used to rebuild a snippet must be strictly longer than
    /// this (characters).
    ///
    /// Default: `15`
    pub min_fragment_len: usize,

    /// Maximum snippet length (characters). Longer snippets are truncated.
    ///
    /// Default: `350`
    pub max_snippet_len: usize,

    /// Scan the raw markup with regular expressions when the tree-based
    /// pipeline finds nothing.
    ///
    /// Has no effect unless the `regex-fallback` feature is enabled.
    ///
    /// Default: `true`
    pub regex_fallback: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_results: 10,
            min_block_text_len: 50,
            min_title_len: 3,
            min_snippet_len: 10,
            min_fragment_len: 15,
            max_snippet_len: 350,
            regex_fallback: true,
        }
    }
}
