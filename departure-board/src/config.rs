//! Configuration for the BART clients, the snapshot service and the server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::StationId;

/// Default base URL for the BART legacy API.
pub const DEFAULT_BASE_URL: &str = "https://api.bart.gov/api";

/// BART's published public API key.
pub const PUBLIC_API_KEY: &str = "MW9S-E7SL-26DU-VV8V";

/// Errors reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where and how to reach the BART API.
#[derive(Debug, Clone)]
pub struct BartConfig {
    /// Static API token, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Transport-level request timeout in seconds
    pub timeout_secs: u64,
}

impl BartConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Station catalog endpoint.
    pub fn stations_url(&self) -> String {
        format!(
            "{}/stn.aspx?cmd=stns&key={}&json=y",
            self.base_url, self.api_key
        )
    }

    /// Real-time departures endpoint for one station.
    pub fn departures_url(&self, station: &StationId) -> String {
        format!(
            "{}/etd.aspx?cmd=etd&orig={}&key={}&json=y",
            self.base_url, station, self.api_key
        )
    }
}

impl Default for BartConfig {
    fn default() -> Self {
        Self::new(PUBLIC_API_KEY)
    }
}

/// Parameters of the snapshot pipeline.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Deadline for the departures request.
    pub feed_timeout: Duration,

    /// How long a fetched station catalog stays valid.
    pub catalog_ttl: Duration,
}

impl ServiceConfig {
    pub fn with_feed_timeout(mut self, timeout: Duration) -> Self {
        self.feed_timeout = timeout;
        self
    }

    pub fn with_catalog_ttl(mut self, ttl: Duration) -> Self {
        self.catalog_ttl = ttl;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            feed_timeout: Duration::from_millis(10_000),
            catalog_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Everything the server binary needs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bart: BartConfig,
    pub service: ServiceConfig,
    pub listen_addr: SocketAddr,
    /// Serve canned responses from this directory instead of calling BART
    pub mock_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `BART_API_KEY` | BART's public key |
    /// | `BART_BASE_URL` | `https://api.bart.gov/api` |
    /// | `FEED_TIMEOUT_MS` | 10000 |
    /// | `CATALOG_TTL_SECS` | 86400 |
    /// | `LISTEN_ADDR` | `127.0.0.1:3000` |
    /// | `BART_MOCK_DIR` | unset |
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("BART_API_KEY").unwrap_or_else(|| {
            tracing::warn!("BART_API_KEY not set, using the public BART key");
            PUBLIC_API_KEY.to_string()
        });

        let mut bart = BartConfig::new(api_key);
        if let Some(url) = lookup("BART_BASE_URL") {
            bart = bart.with_base_url(url);
        }

        let mut service = ServiceConfig::default();
        if let Some(ms) = parse_var(&lookup, "FEED_TIMEOUT_MS")? {
            service = service.with_feed_timeout(Duration::from_millis(ms));
        }
        if let Some(secs) = parse_var(&lookup, "CATALOG_TTL_SECS")? {
            service = service.with_catalog_ttl(Duration::from_secs(secs));
        }

        let listen_addr = parse_var(&lookup, "LISTEN_ADDR")?
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

        Ok(Self {
            bart,
            service,
            listen_addr,
            mock_dir: lookup("BART_MOCK_DIR").map(PathBuf::from),
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
