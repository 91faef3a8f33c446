//! Relative Strength Index (RSI) indicator.

/// RSI (Relative Strength Index) with Wilder smoothing.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Minimum number of prices needed for a value.
    pub fn min_periods(&self) -> usize {
        self.period + 1
    }

    /// RSI after the final price change, or `None` with too little history.
    pub fn calculate(&self, prices: &[f64]) -> Option<f64> {
        self.series(prices).last().copied()
    }

    /// RSI after each price change from the `period`-th onwards.
    ///
    /// The first element corresponds to `prices[period]`.
    pub fn series(&self, prices: &[f64]) -> Vec<f64> {
        let period = self.period;
        if period == 0 || prices.len() < period + 1 {
            return Vec::new();
        }

        let (gains, losses): (Vec<f64>, Vec<f64>) = prices
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                if change > 0.0 {
                    (change, 0.0)
                } else {
                    (0.0, -change)
                }
            })
            .unzip();

        let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
        let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;

        let mut values = Vec::with_capacity(gains.len() - period + 1);
        values.push(rsi_from_averages(avg_gain, avg_loss));

        for i in period..gains.len() {
            avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
            avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
            values.push(rsi_from_averages(avg_gain, avg_loss));
        }

        values
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    // No losses in the window: RS is unbounded.
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
