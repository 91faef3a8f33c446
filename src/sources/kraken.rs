use chrono::DateTime;
use futures_util::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info};

use super::{ensure_success, http_client, HistoricalPriceSource};
use crate::error::{AppError, Result};
use crate::types::{HistoricalSeries, PricePoint, UpstreamSource};

/// Kraken pair name for BTC/USD.
pub const BTC_USD_PAIR: &str = "XBTUSD";
/// Candle width in minutes (one day).
const DAILY_INTERVAL: u32 = 1440;

/// Kraken OHLC response.
///
/// `result` holds one array of candles keyed by Kraken's internal pair name
/// (e.g. `XXBTZUSD`) plus a numeric `last` cursor.
#[derive(Debug, Deserialize)]
struct KrakenOhlcResponse {
    error: Vec<String>,
    result: Option<HashMap<String, Value>>,
}

/// Kraken REST client for daily OHLC history.
#[derive(Clone)]
pub struct KrakenClient {
    client: Client,
    base_url: String,
}

impl KrakenClient {
    /// Create a new Kraken client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: base_url.into(),
        }
    }

    /// Fetch every available daily candle for BTC/USD.
    pub async fn fetch_daily_closes(&self) -> Result<HistoricalSeries> {
        info!("Fetching Bitcoin historical data from Kraken...");

        let url = format!("{}/OHLC", self.base_url.trim_end_matches('/'));
        let interval = DAILY_INTERVAL.to_string();
        let request_start = std::time::Instant::now();

        let result = async {
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("pair", BTC_USD_PAIR),
                    ("interval", interval.as_str()),
                    ("since", "0"),
                ])
                .send()
                .await
                .map_err(AppError::from_reqwest(UpstreamSource::Kraken))?;
            let response = ensure_success(UpstreamSource::Kraken, response).await?;
            let body: KrakenOhlcResponse = response
                .json()
                .await
                .map_err(AppError::from_reqwest(UpstreamSource::Kraken))?;
            parse_ohlc(body)
        }
        .await;

        match &result {
            Ok(series) => {
                debug!(
                    "Kraken OHLC request took {}ms",
                    request_start.elapsed().as_millis()
                );
                info!("Fetched {} historical data points", series.len());
            }
            Err(e) => error!("Error fetching Bitcoin historical data: {}", e),
        }
        result
    }
}

impl HistoricalPriceSource for KrakenClient {
    fn fetch_history(&self) -> BoxFuture<'_, Result<HistoricalSeries>> {
        Box::pin(self.fetch_daily_closes())
    }
}

/// Extract daily closes from a Kraken OHLC body.
fn parse_ohlc(body: KrakenOhlcResponse) -> Result<HistoricalSeries> {
    if let Some(first) = body.error.first() {
        return Err(AppError::upstream(UpstreamSource::Kraken, first.clone()));
    }

    let result = body
        .result
        .ok_or_else(|| AppError::upstream(UpstreamSource::Kraken, "missing result"))?;

    let candles = result
        .iter()
        .filter(|(key, _)| key.as_str() != "last")
        .find_map(|(_, value)| value.as_array())
        .ok_or_else(|| AppError::upstream(UpstreamSource::Kraken, "no candle data in result"))?;

    let points = candles
        .iter()
        .map(parse_candle)
        .collect::<Result<Vec<PricePoint>>>()?;

    Ok(HistoricalSeries::new(points))
}

/// Candle layout: `[time, open, high, low, close, vwap, volume, count]`,
/// with prices encoded as strings.
fn parse_candle(candle: &Value) -> Result<PricePoint> {
    let malformed = || {
        AppError::upstream(
            UpstreamSource::Kraken,
            format!("malformed candle: {}", candle),
        )
    };

    let fields = candle.as_array().ok_or_else(malformed)?;
    let time = fields.first().and_then(Value::as_i64).ok_or_else(malformed)?;
    let close = match fields.get(4) {
        Some(Value::String(s)) => s.parse::<f64>().ok(),
        Some(v) => v.as_f64(),
        None => None,
    }
    .filter(|p| p.is_finite())
    .ok_or_else(malformed)?;

    let date = DateTime::from_timestamp(time, 0)
        .ok_or_else(malformed)?
        .date_naive();

    Ok(PricePoint::new(date, close))
}
