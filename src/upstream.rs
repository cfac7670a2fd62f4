//! Upstream fetch: one authenticated POST asking the data-fetching API for a
//! rendered results page.

use serde::Serialize;

use crate::config::ProxyConfig;
use crate::query::SearchQuery;

/// Upstream diagnostic text is cut to this many characters before it is
/// returned to clients.
pub const MAX_DIAGNOSTIC_CHARS: usize = 200;

/// Errors from the upstream call.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// No API token configured.
    #[error("upstream API token is not configured")]
    MissingCredential,

    /// The upstream answered with a non-success status.
    #[error("upstream returned HTTP {status}: {details}")]
    Status { status: u16, details: String },

    /// The configured timeout elapsed.
    #[error("upstream request timed out")]
    Timeout,

    /// Connection, TLS or body read failure.
    #[error("upstream transport error: {0}")]
    Transport(String),
}

/// Body of the upstream request.
#[derive(Debug, Serialize)]
struct FetchRequest<'a> {
    zone: &'a str,
    url: &'a str,
    format: &'static str,
}

/// Raw results page as returned by the upstream.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

/// Client for the upstream fetch API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Build a client with the configured total-request timeout.
    pub fn new(config: &ProxyConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| UpstreamError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Fetch the results page for `query`.
    ///
    /// Fails with [`UpstreamError::MissingCredential`] before any network
    /// activity when no token is configured.
    pub async fn fetch(&self, config: &ProxyConfig, query: &SearchQuery) -> Result<RawPage, UpstreamError> {
        let token = config
            .api_token
            .as_deref()
            .ok_or(UpstreamError::MissingCredential)?;

        let search_url = query.search_url();
        let request = FetchRequest {
            zone: &config.zone,
            url: &search_url,
            format: "raw",
        };

        let response = self
            .http
            .post(&config.endpoint)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "upstream returned non-success status");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                details: truncate_diagnostic(&text),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(map_transport)?.to_vec();

        tracing::debug!(bytes = body.len(), "upstream page received");
        Ok(RawPage { body, content_type })
    }
}

fn map_transport(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Transport(err.to_string())
    }
}

/// Cut upstream diagnostic text to [`MAX_DIAGNOSTIC_CHARS`].
#[must_use]
pub fn truncate_diagnostic(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(MAX_DIAGNOSTIC_CHARS) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
