//! Result extraction engine.
//!
//! # Module Structure
//!
//! - `loader`: raw body to document tree, with distinct load failures
//! - `classify`: keep/reject decision per candidate block
//! - `text`: visible-text helpers shared by classification and extraction
//! - `fields`: title, URL and snippet recovery plus the acceptance gate
//! - `fallback`: degraded regex scan over raw markup (`regex-fallback` feature)
//! - `pipeline`: the assembler tying the stages together
//!
//! # Usage
//!
//! ```rust
//! use serp_proxy::extractor::{pipeline, HeuristicClassifier};
//! use serp_proxy::{Options, Outcome};
//!
//! let html = r#"<div id="rso"><div class="g">
//!     <a href="https://www.rust-lang.org/"><h3>Rust Programming Language</h3></a>
//!     <div class="VwiC3b">A language empowering everyone to build reliable software.</div>
//! </div></div>"#;
//!
//! let options = Options::default();
//! let classifier = HeuristicClassifier::from_options(&options);
//! let extraction = pipeline::assemble_with(Some(html), "rust", &options, &classifier);
//! assert_eq!(extraction.outcome, Outcome::Organic);
//! ```

pub mod classify;
#[cfg(feature = "regex-fallback")]
pub mod fallback;
pub mod fields;
pub mod loader;
pub mod pipeline;
pub mod text;

pub use classify::{BlockClassifier, HeuristicClassifier, RejectReason, Verdict};
pub use fields::FieldMiss;
pub use loader::load_document;
pub use pipeline::{assemble, assemble_with, placeholder};
