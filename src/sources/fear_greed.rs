use futures_util::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

use super::{ensure_success, http_client, SentimentSource};
use crate::error::{AppError, Result};
use crate::types::{SentimentReading, UpstreamSource};

/// alternative.me `/fng/` response. Numbers arrive as strings.
#[derive(Debug, Deserialize)]
struct FngResponse {
    #[serde(default)]
    data: Vec<FngEntry>,
}

#[derive(Debug, Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
    timestamp: String,
}

/// Client for the Crypto Fear & Greed index.
#[derive(Clone)]
pub struct FearGreedClient {
    client: Client,
    base_url: String,
}

impl FearGreedClient {
    /// Create a new Fear & Greed client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: base_url.into(),
        }
    }

    /// Fetch the latest index reading.
    pub async fn fetch_latest(&self) -> Result<SentimentReading> {
        info!("Fetching Fear & Greed Index...");

        let result = self.request_latest().await;
        match &result {
            Ok(reading) => info!(
                "Fear & Greed Index: {} ({})",
                reading.value, reading.classification
            ),
            Err(e) => error!("Error fetching Fear & Greed Index: {}", e),
        }
        result
    }

    async fn request_latest(&self) -> Result<SentimentReading> {
        let url = format!("{}/fng/", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[("limit", "1")])
            .send()
            .await
            .map_err(AppError::from_reqwest(UpstreamSource::FearGreed))?;
        let response = ensure_success(UpstreamSource::FearGreed, response).await?;
        let body: FngResponse = response
            .json()
            .await
            .map_err(AppError::from_reqwest(UpstreamSource::FearGreed))?;

        parse_reading(body)
    }
}

impl SentimentSource for FearGreedClient {
    fn fetch_sentiment(&self) -> BoxFuture<'_, Result<SentimentReading>> {
        Box::pin(self.fetch_latest())
    }
}

fn parse_reading(body: FngResponse) -> Result<SentimentReading> {
    let invalid = |msg: String| AppError::upstream(UpstreamSource::FearGreed, msg);

    let entry = body
        .data
        .into_iter()
        .next()
        .ok_or_else(|| invalid("response has no data".to_string()))?;

    let value: u8 = entry
        .value
        .trim()
        .parse()
        .ok()
        .filter(|v| *v <= SentimentReading::MAX_VALUE)
        .ok_or_else(|| invalid(format!("invalid index value {:?}", entry.value)))?;

    let timestamp: i64 = entry
        .timestamp
        .trim()
        .parse()
        .map_err(|_| invalid(format!("invalid timestamp {:?}", entry.timestamp)))?;

    Ok(SentimentReading {
        value,
        classification: entry.value_classification,
        timestamp,
    })
}
