//! Buy/sell signal rule combining sentiment and RSI.

use crate::types::SignalState;

/// Sentiment must be strictly below this for a buy.
pub const BUY_SENTIMENT_BELOW: u8 = 20;
/// RSI must be strictly below this for a buy.
pub const BUY_RSI_BELOW: f64 = 30.0;
/// Sentiment must be strictly above this for a sell.
pub const SELL_SENTIMENT_ABOVE: u8 = 80;
/// RSI must be strictly above this for a sell.
pub const SELL_RSI_ABOVE: f64 = 70.0;

/// Decide the signal. An absent RSI never satisfies either rule.
pub fn decide_signal(sentiment: u8, rsi: Option<f64>) -> SignalState {
    let Some(rsi) = rsi else {
        return SignalState::None;
    };

    if sentiment < BUY_SENTIMENT_BELOW && rsi < BUY_RSI_BELOW {
        SignalState::Buy
    } else if sentiment > SELL_SENTIMENT_ABOVE && rsi > SELL_RSI_ABOVE {
        SignalState::Sell
    } else {
        SignalState::None
    }
}

/// Human-readable explanation of the signal for the dashboard.
pub fn explain_signal(signal: SignalState, sentiment: u8, rsi: Option<f64>) -> String {
    match signal {
        SignalState::Buy => format!(
            "BUY conditions met: Fear & Greed < {} AND RSI < {}",
            BUY_SENTIMENT_BELOW, BUY_RSI_BELOW
        ),
        SignalState::Sell => format!(
            "SELL conditions met: Fear & Greed > {} AND RSI > {}",
            SELL_SENTIMENT_ABOVE, SELL_RSI_ABOVE
        ),
        SignalState::None => {
            let rsi = rsi
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "N/A".to_string());
            format!(
                "Waiting for trading signals:\n\
                 • BUY: Fear & Greed < {} (currently {}) AND RSI < {} (currently {})\n\
                 • SELL: Fear & Greed > {} (currently {}) AND RSI > {} (currently {})",
                BUY_SENTIMENT_BELOW,
                sentiment,
                BUY_RSI_BELOW,
                rsi,
                SELL_SENTIMENT_ABOVE,
                sentiment,
                SELL_RSI_ABOVE,
                rsi
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_signal() {
        assert_eq!(decide_signal(15, Some(25.0)), SignalState::Buy);
    }

    #[test]
    fn test_sell_signal() {
        assert_eq!(decide_signal(85, Some(75.0)), SignalState::Sell);
    }

    #[test]
    fn test_no_signal() {
        assert_eq!(decide_signal(50, Some(50.0)), SignalState::None);
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(decide_signal(20, Some(25.0)), SignalState::None);
        assert_eq!(decide_signal(15, Some(30.0)), SignalState::None);
        assert_eq!(decide_signal(80, Some(75.0)), SignalState::None);
        assert_eq!(decide_signal(85, Some(70.0)), SignalState::None);
    }

    #[test]
    fn test_one_condition_is_not_enough() {
        assert_eq!(decide_signal(10, Some(50.0)), SignalState::None);
        assert_eq!(decide_signal(50, Some(10.0)), SignalState::None);
        assert_eq!(decide_signal(90, Some(50.0)), SignalState::None);
    }

    #[test]
    fn test_absent_rsi_never_fires() {
        assert_eq!(decide_signal(5, None), SignalState::None);
        assert_eq!(decide_signal(95, None), SignalState::None);
    }

    #[test]
    fn test_explanations() {
        assert!(explain_signal(SignalState::Buy, 10, Some(20.0)).starts_with("BUY"));
        assert!(explain_signal(SignalState::Sell, 90, Some(80.0)).starts_with("SELL"));

        let waiting = explain_signal(SignalState::None, 50, Some(48.123));
        assert!(waiting.contains("currently 50"));
        assert!(waiting.contains("currently 48.12"));

        let no_rsi = explain_signal(SignalState::None, 50, None);
        assert!(no_rsi.contains("currently N/A"));
    }
}
