//! Error types for serp-proxy.
//!
//! Errors returned by the extraction engine and query validation. HTTP-facing
//! errors live in [`crate::server::ProxyError`].

/// Why the Document Loader refused a raw upstream body.
///
/// A load failure is never fatal: the assembler turns it into a placeholder
/// result so the caller still gets a non-empty result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// No body was supplied at all.
    #[error("document is missing")]
    Missing,

    /// The body was empty or whitespace only.
    #[error("document is empty")]
    Empty,

    /// The body contains no markup (e.g. a JSON error payload or plain text).
    #[error("document is not markup")]
    NotMarkup,
}

/// Error type for query construction and other fallible library calls.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The search query failed validation.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
