//! Simple Moving Average (SMA).

/// How to treat windows with fewer points than the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaMode {
    /// Not computable until `period` points are available.
    Strict,
    /// Average over whatever points exist, up to `period`.
    Lenient,
}

/// SMA over closing prices.
///
/// Headline values and crossover detection use [`MaMode::Strict`]; chart
/// overlays use [`MaMode::Lenient`] so the line starts at the first point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sma {
    period: usize,
    mode: MaMode,
}

impl Sma {
    pub fn strict(period: usize) -> Self {
        Self {
            period,
            mode: MaMode::Strict,
        }
    }

    pub fn lenient(period: usize) -> Self {
        Self {
            period,
            mode: MaMode::Lenient,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn mode(&self) -> MaMode {
        self.mode
    }

    /// Average ending at the last price.
    pub fn value(&self, prices: &[f64]) -> Option<f64> {
        match self.mode {
            MaMode::Strict => sma_strict(prices, self.period),
            MaMode::Lenient => sma_lenient(prices, self.period),
        }
    }

    /// One value per input index, computed in a single forward pass.
    pub fn series(&self, prices: &[f64]) -> Vec<Option<f64>> {
        let mut out = Vec::with_capacity(prices.len());
        if self.period == 0 {
            out.resize(prices.len(), None);
            return out;
        }

        let mut sum = 0.0;
        for (i, price) in prices.iter().enumerate() {
            sum += price;
            if i >= self.period {
                sum -= prices[i - self.period];
            }

            let window = (i + 1).min(self.period);
            let value = match self.mode {
                MaMode::Strict if window < self.period => None,
                _ => Some(sum / window as f64),
            };
            out.push(value);
        }
        out
    }
}

/// Mean of the last `period` prices, or `None` if fewer are available.
pub fn sma_strict(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }
    let sum: f64 = prices[prices.len() - period..].iter().sum();
    Some(sum / period as f64)
}

/// Mean of the last `period` prices, or of all of them if fewer exist.
pub fn sma_lenient(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.is_empty() {
        return None;
    }
    let window = prices.len().min(period);
    let sum: f64 = prices[prices.len() - window..].iter().sum();
    Some(sum / window as f64)
}
