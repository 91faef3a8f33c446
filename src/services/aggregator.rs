//! Dashboard aggregation.
//!
//! Fetches history, spot price and sentiment concurrently, derives the
//! indicators from the full history, decides the signal and trims the
//! history for transport.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::services::indicators::compute_indicators;
use crate::services::signals::decide_signal;
use crate::sources::{
    FearGreedClient, HistoricalPriceSource, KrakenClient, LiveCoinWatchClient, SentimentSource,
    SpotPriceSource,
};
use crate::types::{DashboardPayload, IndicatorSet, SignalState};

/// Builds [`DashboardPayload`]s from the three upstream sources.
pub struct DashboardAggregator {
    history: Arc<dyn HistoricalPriceSource>,
    spot: Arc<dyn SpotPriceSource>,
    sentiment: Arc<dyn SentimentSource>,
    history_limit: usize,
    rsi_period: usize,
}

impl DashboardAggregator {
    pub fn new(
        history: Arc<dyn HistoricalPriceSource>,
        spot: Arc<dyn SpotPriceSource>,
        sentiment: Arc<dyn SentimentSource>,
        history_limit: usize,
        rsi_period: usize,
    ) -> Self {
        Self {
            history,
            spot,
            sentiment,
            history_limit,
            rsi_period,
        }
    }

    /// Wire up the real upstream clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        let upstream = &config.upstream;
        Self::new(
            Arc::new(KrakenClient::new(
                upstream.kraken_api_url.clone(),
                upstream.history_timeout,
            )),
            Arc::new(LiveCoinWatchClient::new(
                upstream.lcw_api_url.clone(),
                upstream.lcw_api_key.clone(),
                upstream.request_timeout,
            )),
            Arc::new(FearGreedClient::new(
                upstream.fear_greed_api_url.clone(),
                upstream.request_timeout,
            )),
            config.history_limit,
            config.rsi_period,
        )
    }

    /// Fetch all sources and assemble the payload.
    ///
    /// The first failing fetch aborts the others and fails the whole call.
    pub async fn build_payload(&self) -> Result<DashboardPayload> {
        info!("=== Fetching Bitcoin data ===");

        let (history, current_price, sentiment) = tokio::try_join!(
            self.history.fetch_history(),
            self.spot.fetch_current_price(),
            self.sentiment.fetch_sentiment(),
        )?;

        let indicators = compute_indicators(&history.prices(), self.rsi_period);
        log_indicators(&indicators);

        let signal = decide_signal(sentiment.value, indicators.rsi);
        match signal {
            SignalState::Buy => warn!("BUY SIGNAL TRIGGERED"),
            SignalState::Sell => warn!("SELL SIGNAL TRIGGERED"),
            SignalState::None => {}
        }

        let history = history.truncate_to_recent(self.history_limit);

        Ok(DashboardPayload::new(
            current_price,
            sentiment,
            indicators,
            signal,
            history,
        ))
    }
}

fn log_indicators(indicators: &IndicatorSet) {
    let fmt = |v: Option<f64>| v.map_or_else(|| "N/A".to_string(), |v| format!("{:.2}", v));
    info!("RSI: {}", fmt(indicators.rsi));
    info!("50-Day MA: {}", fmt(indicators.ma50));
    info!("200-Day MA: {}", fmt(indicators.ma200));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::types::{HistoricalSeries, PricePoint, SentimentReading, UpstreamSource};
    use chrono::NaiveDate;
    use futures_util::future::BoxFuture;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio_test::{assert_err, assert_ok};

    struct StubHistory(Vec<f64>);

    impl HistoricalPriceSource for StubHistory {
        fn fetch_history(&self) -> BoxFuture<'_, Result<HistoricalSeries>> {
            let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
            let points = self
                .0
                .iter()
                .enumerate()
                .map(|(i, p)| PricePoint::new(start + chrono::Duration::days(i as i64), *p))
                .collect();
            Box::pin(async move { Ok(HistoricalSeries::new(points)) })
        }
    }

    struct StubSpot(f64);

    impl SpotPriceSource for StubSpot {
        fn fetch_current_price(&self) -> BoxFuture<'_, Result<f64>> {
            let price = self.0;
            Box::pin(async move { Ok(price) })
        }
    }

    struct StubSentiment(Option<u8>);

    impl SentimentSource for StubSentiment {
        fn fetch_sentiment(&self) -> BoxFuture<'_, Result<SentimentReading>> {
            let value = self.0;
            Box::pin(async move {
                match value {
                    Some(value) => Ok(SentimentReading {
                        value,
                        classification: "Neutral".to_string(),
                        timestamp: 1_700_000_000,
                    }),
                    None => Err(AppError::upstream(UpstreamSource::FearGreed, "HTTP 503")),
                }
            })
        }
    }

    /// Spot source that records whether its fetch ran to completion.
    struct SlowSpot(Arc<AtomicBool>);

    impl SpotPriceSource for SlowSpot {
        fn fetch_current_price(&self) -> BoxFuture<'_, Result<f64>> {
            let finished = self.0.clone();
            Box::pin(async move {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                finished.store(true, Ordering::SeqCst);
                Ok(1.0)
            })
        }
    }

    fn aggregator(prices: Vec<f64>, sentiment: Option<u8>) -> DashboardAggregator {
        DashboardAggregator::new(
            Arc::new(StubHistory(prices)),
            Arc::new(StubSpot(50_000.0)),
            Arc::new(StubSentiment(sentiment)),
            365,
            14,
        )
    }

    #[tokio::test]
    async fn test_payload_truncates_after_computing() {
        let prices: Vec<f64> = (0..500).map(|i| 20_000.0 + i as f64 * 10.0).collect();
        let payload = assert_ok!(aggregator(prices, Some(50)).build_payload().await);

        assert_eq!(payload.historical_data.len(), 365);
        assert_eq!(payload.current_price, 50_000.0);
        // MA200 over the full history: mean of indices 300..500.
        assert_eq!(payload.ma200.as_deref(), Some("23995.00"));
        assert_eq!(payload.ma50.as_deref(), Some("24745.00"));
        assert_eq!(payload.rsi.as_deref(), Some("100.00"));
    }

    #[tokio::test]
    async fn test_short_history_yields_null_indicators() {
        let payload = assert_ok!(aggregator(vec![100.0; 10], Some(10)).build_payload().await);
        assert!(payload.rsi.is_none());
        assert!(payload.ma50.is_none());
        assert!(payload.ma200.is_none());
        // Extreme fear alone cannot fire without an RSI.
        assert!(!payload.buy_signal);
        assert!(!payload.sell_signal);
    }

    #[tokio::test]
    async fn test_buy_signal_fires() {
        let prices: Vec<f64> = (0..60).map(|i| 60_000.0 - i as f64 * 100.0).collect();
        let payload = assert_ok!(aggregator(prices, Some(10)).build_payload().await);
        assert!(payload.buy_signal);
        assert!(!payload.sell_signal);
    }

    #[tokio::test]
    async fn test_sell_signal_fires() {
        let prices: Vec<f64> = (0..60).map(|i| 30_000.0 + i as f64 * 100.0).collect();
        let payload = assert_ok!(aggregator(prices, Some(90)).build_payload().await);
        assert!(payload.sell_signal);
        assert!(!payload.buy_signal);
    }

    #[tokio::test]
    async fn test_sentiment_failure_fails_whole_request() {
        let err = assert_err!(aggregator(vec![1.0; 300], None).build_payload().await);
        assert_eq!(err.upstream_source(), UpstreamSource::FearGreed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_does_not_wait_for_slow_fetch() {
        let finished = Arc::new(AtomicBool::new(false));
        let aggregator = DashboardAggregator::new(
            Arc::new(StubHistory(vec![1.0; 30])),
            Arc::new(SlowSpot(finished.clone())),
            Arc::new(StubSentiment(None)),
            365,
            14,
        );

        assert_err!(aggregator.build_payload().await);
        assert!(!finished.load(Ordering::SeqCst));
    }
}
