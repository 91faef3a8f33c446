use std::env;
use std::time::Duration;

const DEFAULT_KRAKEN_API_URL: &str = "https://api.kraken.com/0/public";
const DEFAULT_LCW_API_URL: &str = "https://api.livecoinwatch.com";
const DEFAULT_FEAR_GREED_API_URL: &str = "https://api.alternative.me";

/// Upstream endpoints and per-call timeouts.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Kraken public REST base URL.
    pub kraken_api_url: String,
    /// Live Coin Watch REST base URL.
    pub lcw_api_url: String,
    /// Live Coin Watch API key. Price fetches fail without one.
    pub lcw_api_key: Option<String>,
    /// alternative.me base URL for the Fear & Greed index.
    pub fear_greed_api_url: String,
    /// Timeout for the full-history OHLC call.
    pub history_timeout: Duration,
    /// Timeout for the price and sentiment calls.
    pub request_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            kraken_api_url: DEFAULT_KRAKEN_API_URL.to_string(),
            lcw_api_url: DEFAULT_LCW_API_URL.to_string(),
            lcw_api_key: None,
            fear_greed_api_url: DEFAULT_FEAR_GREED_API_URL.to_string(),
            history_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Terminal dashboard settings.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the server the dashboard polls.
    pub server_url: String,
    /// Refresh interval.
    pub poll_interval: Duration,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Upstream data sources.
    pub upstream: UpstreamConfig,
    /// Number of most recent daily points returned to clients.
    pub history_limit: usize,
    /// RSI lookback period.
    pub rsi_period: usize,
    /// Terminal dashboard settings.
    pub dashboard: DashboardConfig,
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = parse_env("PORT").unwrap_or(3000);

        let defaults = UpstreamConfig::default();
        let upstream = UpstreamConfig {
            kraken_api_url: env::var("KRAKEN_API_URL").unwrap_or(defaults.kraken_api_url),
            lcw_api_url: env::var("LCW_API_URL").unwrap_or(defaults.lcw_api_url),
            lcw_api_key: env::var("LCW_API_KEY").ok().filter(|k| !k.is_empty()),
            fear_greed_api_url: env::var("FEAR_GREED_API_URL")
                .unwrap_or(defaults.fear_greed_api_url),
            history_timeout: parse_env("HISTORY_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.history_timeout),
            request_timeout: parse_env("UPSTREAM_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        };

        let dashboard = DashboardConfig {
            // The dashboard usually runs next to the server, so default to loopback.
            server_url: env::var("DASHBOARD_URL")
                .unwrap_or_else(|_| format!("http://127.0.0.1:{}", port)),
            poll_interval: parse_env("POLL_INTERVAL_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(60)),
        };

        Self {
            host,
            port,
            upstream,
            history_limit: parse_env("HISTORY_LIMIT").unwrap_or(365),
            rsi_period: parse_env("RSI_PERIOD").filter(|p| *p > 0).unwrap_or(14),
            dashboard,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
