//! serp-proxy server binary.
//!
//! Reads configuration from the environment, serves until Ctrl-C.

use serp_proxy::server::ProxyServer;
use serp_proxy::{Options, ProxyConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ProxyConfig::from_env();
    if !config.has_token() {
        tracing::warn!("UPSTREAM_API_TOKEN is not set; search requests will fail until it is configured");
    }
    tracing::info!(zone = %config.zone, endpoint = %config.endpoint, "starting serp proxy");

    let server = ProxyServer::start(config, Options::default())
        .await
        .map_err(|e| anyhow::anyhow!("serp proxy failed to start: {e:?}"))?;

    tokio::signal::ctrl_c().await?;
    tracing::info!(port = server.port(), "shutting down");
    server.shutdown();
    Ok(())
}
