use serde::{Deserialize, Serialize};

use super::{HistoricalSeries, IndicatorSet, SentimentReading, SignalState};

/// Format an indicator for the wire: two decimals, or `None` when absent.
pub fn format_indicator(value: Option<f64>) -> Option<String> {
    value.map(|v| format!("{:.2}", v))
}

/// Response body of `GET /api/bitcoin-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub current_price: f64,
    pub fear_greed_index: SentimentReading,
    pub rsi: Option<String>,
    pub ma50: Option<String>,
    pub ma200: Option<String>,
    pub buy_signal: bool,
    pub sell_signal: bool,
    pub historical_data: HistoricalSeries,
}

impl DashboardPayload {
    pub fn new(
        current_price: f64,
        sentiment: SentimentReading,
        indicators: IndicatorSet,
        signal: SignalState,
        history: HistoricalSeries,
    ) -> Self {
        Self {
            current_price,
            fear_greed_index: sentiment,
            rsi: format_indicator(indicators.rsi),
            ma50: format_indicator(indicators.ma50),
            ma200: format_indicator(indicators.ma200),
            buy_signal: signal.is_buy(),
            sell_signal: signal.is_sell(),
            historical_data: history,
        }
    }

    pub fn signal(&self) -> SignalState {
        SignalState::from_flags(self.buy_signal, self.sell_signal)
    }

    /// RSI parsed back from its wire string.
    pub fn rsi_value(&self) -> Option<f64> {
        self.rsi.as_deref().and_then(|v| v.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PricePoint;
    use chrono::NaiveDate;

    fn sample_payload(indicators: IndicatorSet, signal: SignalState) -> DashboardPayload {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        DashboardPayload::new(
            43250.5,
            SentimentReading {
                value: 15,
                classification: "Extreme Fear".to_string(),
                timestamp: 1_704_067_200,
            },
            indicators,
            signal,
            HistoricalSeries::new(vec![PricePoint::new(date, 42000.0)]),
        )
    }

    #[test]
    fn test_format_indicator() {
        assert_eq!(format_indicator(Some(65.789_473)), Some("65.79".to_string()));
        assert_eq!(format_indicator(Some(0.0)), Some("0.00".to_string()));
        assert_eq!(format_indicator(None), None);
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = sample_payload(
            IndicatorSet {
                rsi: Some(25.456),
                ma50: Some(41000.0),
                ma200: None,
            },
            SignalState::Buy,
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["currentPrice"], 43250.5);
        assert_eq!(json["fearGreedIndex"]["value"], 15);
        assert_eq!(json["fearGreedIndex"]["classification"], "Extreme Fear");
        assert_eq!(json["rsi"], "25.46");
        assert_eq!(json["ma50"], "41000.00");
        assert!(json["ma200"].is_null());
        assert_eq!(json["buySignal"], true);
        assert_eq!(json["sellSignal"], false);
        assert_eq!(json["historicalData"][0]["date"], "2024-01-01");
        assert_eq!(json["historicalData"][0]["price"], 42000.0);
    }

    #[test]
    fn test_payload_round_trips_signal_and_rsi() {
        let payload = sample_payload(
            IndicatorSet {
                rsi: Some(75.0),
                ..Default::default()
            },
            SignalState::Sell,
        );
        assert_eq!(payload.signal(), SignalState::Sell);
        assert_eq!(payload.rsi_value(), Some(75.0));
    }
}
