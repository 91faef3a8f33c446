use futures_util::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use super::{ensure_success, http_client, SpotPriceSource};
use crate::error::{AppError, Result};
use crate::types::UpstreamSource;

/// Request body for `POST /coins/single`.
#[derive(Debug, Serialize)]
struct CoinSingleRequest<'a> {
    currency: &'a str,
    code: &'a str,
    meta: bool,
}

/// Subset of the `coins/single` response we use.
#[derive(Debug, Deserialize)]
struct CoinSingleResponse {
    rate: Option<f64>,
}

/// Live Coin Watch client for the current BTC price.
#[derive(Clone)]
pub struct LiveCoinWatchClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LiveCoinWatchClient {
    /// Create a new Live Coin Watch client.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Fetch the current BTC price in USD.
    pub async fn fetch_btc_usd(&self) -> Result<f64> {
        info!("Fetching current Bitcoin price from Live Coin Watch...");

        let result = self.request_rate().await;
        match &result {
            Ok(price) => info!("Current Bitcoin price: ${:.2}", price),
            Err(e) => error!("Error fetching current Bitcoin price: {}", e),
        }
        result
    }

    async fn request_rate(&self) -> Result<f64> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::upstream(UpstreamSource::LiveCoinWatch, "LCW_API_KEY is not set")
        })?;

        let url = format!("{}/coins/single", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .json(&CoinSingleRequest {
                currency: "USD",
                code: "BTC",
                meta: true,
            })
            .send()
            .await
            .map_err(AppError::from_reqwest(UpstreamSource::LiveCoinWatch))?;
        let response = ensure_success(UpstreamSource::LiveCoinWatch, response).await?;
        let body: CoinSingleResponse = response
            .json()
            .await
            .map_err(AppError::from_reqwest(UpstreamSource::LiveCoinWatch))?;

        parse_rate(body)
    }
}

impl SpotPriceSource for LiveCoinWatchClient {
    fn fetch_current_price(&self) -> BoxFuture<'_, Result<f64>> {
        Box::pin(self.fetch_btc_usd())
    }
}

fn parse_rate(body: CoinSingleResponse) -> Result<f64> {
    match body.rate {
        Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        Some(rate) => Err(AppError::upstream(
            UpstreamSource::LiveCoinWatch,
            format!("invalid rate {}", rate),
        )),
        None => Err(AppError::upstream(
            UpstreamSource::LiveCoinWatch,
            "response has no rate",
        )),
    }
}
