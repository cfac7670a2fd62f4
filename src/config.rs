//! Process configuration, read once at startup.

use std::fmt;
use std::time::Duration;

/// Upstream endpoint used when `UPSTREAM_ENDPOINT` is unset.
pub const DEFAULT_ENDPOINT: &str = "https://api.brightdata.com/request";

/// Zone used when `UPSTREAM_ZONE` is unset.
pub const DEFAULT_ZONE: &str = "serp_api1";

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Read-only proxy configuration.
///
/// A missing token is not a startup error: requests are answered with a
/// configuration error instead, so `/health` stays reachable.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub api_token: Option<String>,
    pub zone: String,
    pub endpoint: String,
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

// Hand-written so the token never reaches a log line.
impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("zone", &self.zone)
            .field("endpoint", &self.endpoint)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            zone: DEFAULT_ZONE.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProxyConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset and
    /// unparseable numbers fall back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let port = match get("PORT").map(|p| p.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                tracing::warn!(default = DEFAULT_PORT, "PORT is not a valid port number, using default");
                defaults.port
            }
            None => defaults.port,
        };
        let timeout = match get("UPSTREAM_TIMEOUT_SECS").map(|t| t.parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
            Some(_) => {
                tracing::warn!(
                    default = DEFAULT_TIMEOUT_SECS,
                    "UPSTREAM_TIMEOUT_SECS is not a positive integer, using default"
                );
                defaults.timeout
            }
            None => defaults.timeout,
        };

        Self {
            api_token: get("UPSTREAM_API_TOKEN"),
            zone: get("UPSTREAM_ZONE").unwrap_or(defaults.zone),
            endpoint: get("UPSTREAM_ENDPOINT").unwrap_or(defaults.endpoint),
            host: get("HOST").unwrap_or(defaults.host),
            port,
            timeout,
        }
    }

    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.api_token.is_some()
    }

    /// `host:port` for the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
