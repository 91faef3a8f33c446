//! Upstream data sources.
//!
//! Each source sits behind a small trait so the aggregator can be driven by
//! stub implementations in tests.

pub mod fear_greed;
pub mod kraken;
pub mod livecoinwatch;

pub use fear_greed::FearGreedClient;
pub use kraken::KrakenClient;
pub use livecoinwatch::LiveCoinWatchClient;

use futures_util::future::BoxFuture;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::types::{HistoricalSeries, SentimentReading, UpstreamSource};

const USER_AGENT: &str = "BitcoinTracker/1.0";

/// Daily closing-price history, oldest first.
pub trait HistoricalPriceSource: Send + Sync {
    fn fetch_history(&self) -> BoxFuture<'_, Result<HistoricalSeries>>;
}

/// Current BTC/USD spot price.
pub trait SpotPriceSource: Send + Sync {
    fn fetch_current_price(&self) -> BoxFuture<'_, Result<f64>>;
}

/// Latest market sentiment reading.
pub trait SentimentSource: Send + Sync {
    fn fetch_sentiment(&self) -> BoxFuture<'_, Result<SentimentReading>>;
}

/// HTTP client with our user agent and a per-request timeout.
fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Turn a non-2xx response into an upstream error, logging a body excerpt.
async fn ensure_success(source: UpstreamSource, response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let excerpt: String = text.chars().take(200).collect();
    warn!("{} API returned {}: {}", source, status, excerpt);
    Err(AppError::upstream(source, format!("HTTP {}", status)))
}
