//! Technical indicator implementations.

pub mod crossover;
pub mod rsi;
pub mod sma;
pub mod weekly;

pub use crossover::{
    crossover_report, daily_ma_crossover, detect_crossover, weekly_price_crossover,
};
pub use rsi::Rsi;
pub use sma::{sma_lenient, sma_strict, MaMode, Sma};
pub use weekly::{resample_weekly, week_start};

use crate::types::IndicatorSet;

/// Headline RSI, MA50 and MA200 over the full closing-price history.
pub fn compute_indicators(prices: &[f64], rsi_period: usize) -> IndicatorSet {
    IndicatorSet {
        rsi: Rsi::new(rsi_period).calculate(prices),
        ma50: Sma::strict(50).value(prices),
        ma200: Sma::strict(200).value(prices),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_indicators_short_history() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let set = compute_indicators(&prices, 14);
        assert_eq!(set.rsi, Some(100.0));
        assert!(set.ma50.is_some());
        assert!(set.ma200.is_none());
    }

    #[test]
    fn test_compute_indicators_empty() {
        assert_eq!(compute_indicators(&[], 14), IndicatorSet::default());
    }
}
