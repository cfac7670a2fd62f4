//! HTTP surface of the proxy.
//!
//! Routes:
//! - `GET /health`
//! - `POST /api/brightdata` (JSON body)
//! - `GET /api/brightdataget` (query string)
//!
//! Both search routes build the same [`SearchQuery`], call the upstream once
//! and run the extraction engine inline. The parsed document is not `Send`,
//! so extraction finishes before the handler yields again.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::ProxyConfig;
use crate::options::Options;
use crate::query::SearchQuery;
use crate::result::ResultSet;
use crate::upstream::{UpstreamClient, UpstreamError};

const AVAILABLE_ENDPOINTS: &[&str] = &[
    "GET /health",
    "POST /api/brightdata",
    "GET /api/brightdataget",
];

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Request-terminating failures, each mapped to one status code.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Missing, blank or mistyped query parts, or an unreadable body. (400)
    #[error("{0}")]
    InvalidQuery(String),

    /// No upstream token configured. (500)
    #[error("upstream API token is not configured")]
    MissingCredential,

    /// Upstream answered with a non-success status. (502)
    #[error("upstream request failed with status {status}")]
    Upstream { status: u16, details: String },

    /// Upstream did not answer within the configured timeout. (504)
    #[error("upstream request timed out")]
    UpstreamTimeout,

    /// Anything else. (500)
    #[error("internal server error")]
    Internal(String),
}

impl ProxyError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::MissingCredential | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::MissingCredential => Some("set UPSTREAM_API_TOKEN and restart the proxy".to_string()),
            Self::Upstream { details, .. } => Some(details.clone()),
            Self::Internal(message) => Some(message.clone()),
            Self::InvalidQuery(_) | Self::UpstreamTimeout => None,
        }
    }
}

impl From<crate::Error> for ProxyError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::InvalidQuery(message) => Self::InvalidQuery(message),
        }
    }
}

impl From<UpstreamError> for ProxyError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::MissingCredential => Self::MissingCredential,
            UpstreamError::Status { status, details } => Self::Upstream { status, details },
            UpstreamError::Timeout => Self::UpstreamTimeout,
            UpstreamError::Transport(message) => Self::Internal(message),
        }
    }
}

impl From<JsonRejection> for ProxyError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidQuery(format!("malformed JSON body: {}", rejection.body_text()))
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    timestamp: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = ErrorEnvelope {
            success: false,
            error: self.to_string(),
            details: self.details(),
            timestamp: timestamp(),
        };
        (status, Json(envelope)).into_response()
    }
}

// ---------------------------------------------------------------------------
// State and router
// ---------------------------------------------------------------------------

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ProxyConfig>,
    options: Arc<Options>,
    upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: ProxyConfig, options: Options) -> Result<Self, ProxyError> {
        let upstream = UpstreamClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            options: Arc::new(options),
            upstream,
        })
    }
}

/// Build the router with all routes and the 404 fallback.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/brightdata", post(handle_search_body))
        .route("/api/brightdataget", get(handle_search_params))
        .fallback(handle_not_found)
        .with_state(state)
}

/// A running proxy server.
pub struct ProxyServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ProxyServer {
    /// Bind `{config.host}:{config.port}` (port `0` picks a free port) and
    /// serve in a background task.
    pub async fn start(config: ProxyConfig, options: Options) -> Result<Self, ProxyError> {
        let bind_addr = config.bind_addr();
        let state = AppState::new(config, options)?;
        let app = router(state);

        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ProxyError::Internal(format!("bind {bind_addr} failed: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ProxyError::Internal(format!("failed to get local addr: {e}")))?;

        info!("serp proxy listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("serp proxy server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for ProxyServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthConfig {
    has_token: bool,
    zone: String,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    config: HealthConfig,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: timestamp(),
        config: HealthConfig {
            has_token: state.config.has_token(),
            zone: state.config.zone.clone(),
            endpoint: state.config.endpoint.clone(),
        },
    })
}

/// Success envelope for both search routes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub results: ResultSet,
    pub total_results: usize,
    pub source: &'static str,
    pub timestamp: String,
}

async fn handle_search_body(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SearchResponse>, ProxyError> {
    let Json(body) = body?;
    let query = SearchQuery::from_json_body(&body)?;
    run_search(&state, query).await
}

async fn handle_search_params(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SearchResponse>, ProxyError> {
    let query = SearchQuery::from_query_params(&params)?;
    run_search(&state, query).await
}

/// Validated query to response: upstream fetch, then extraction.
async fn run_search(state: &AppState, query: SearchQuery) -> Result<Json<SearchResponse>, ProxyError> {
    let started = Instant::now();
    tracing::debug!(query = query.text(), num = query.result_count(), "search request");

    if !state.config.has_token() {
        tracing::warn!("search rejected: upstream token not configured");
        return Err(ProxyError::MissingCredential);
    }

    let page = state.upstream.fetch(&state.config, &query).await?;

    let extraction = crate::extract_results_bytes(
        &page.body,
        page.content_type.as_deref(),
        query.text(),
        &state.options,
    );

    info!(
        results = extraction.results.len(),
        outcome = ?extraction.outcome,
        candidates = extraction.stats.candidates,
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "search served"
    );

    Ok(Json(SearchResponse {
        success: true,
        query: query.text().to_string(),
        total_results: extraction.results.len(),
        source: extraction.outcome.source().label(),
        results: extraction.results,
        timestamp: timestamp(),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotFoundResponse {
    success: bool,
    error: &'static str,
    available_endpoints: &'static [&'static str],
    timestamp: String,
}

async fn handle_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            success: false,
            error: "endpoint not found",
            available_endpoints: AVAILABLE_ENDPOINTS,
            timestamp: timestamp(),
        }),
    )
}
