use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Headline indicator values computed over the full history.
///
/// `None` means the history was too short for the indicator, which is
/// distinct from a computed value of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub rsi: Option<f64>,
    pub ma50: Option<f64>,
    pub ma200: Option<f64>,
}

/// Trading signal decided once per aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SignalState {
    Buy,
    Sell,
    #[default]
    None,
}

impl SignalState {
    pub fn is_buy(&self) -> bool {
        matches!(self, SignalState::Buy)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, SignalState::Sell)
    }

    /// Rebuild the state from the payload's pair of flags.
    pub fn from_flags(buy: bool, sell: bool) -> Self {
        match (buy, sell) {
            (true, _) => SignalState::Buy,
            (false, true) => SignalState::Sell,
            (false, false) => SignalState::None,
        }
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            SignalState::Buy => "BUY",
            SignalState::Sell => "SELL",
            SignalState::None => "NONE",
        }
    }
}

/// Direction of a series crossing another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossDirection {
    Above,
    Below,
}

impl fmt::Display for CrossDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossDirection::Above => write!(f, "Above"),
            CrossDirection::Below => write!(f, "Below"),
        }
    }
}

/// Most recent crossover between two series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Crossover {
    Crossed {
        direction: CrossDirection,
        date: NaiveDate,
    },
    NoCrossover,
    InsufficientData,
}

impl Crossover {
    pub fn above(date: NaiveDate) -> Self {
        Crossover::Crossed {
            direction: CrossDirection::Above,
            date,
        }
    }

    pub fn below(date: NaiveDate) -> Self {
        Crossover::Crossed {
            direction: CrossDirection::Below,
            date,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Crossover::Crossed { date, .. } => Some(*date),
            _ => None,
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crossover::Crossed { direction, date } => {
                write!(f, "{} on {}", direction, date.format("%Y-%m-%d"))
            }
            Crossover::NoCrossover => write!(f, "No crossover detected"),
            Crossover::InsufficientData => write!(f, "Insufficient data"),
        }
    }
}

/// The three crossovers shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossoverReport {
    /// Daily MA50 against daily MA200.
    pub daily: Crossover,
    /// Weekly price against its 50-week MA.
    pub weekly50: Crossover,
    /// Weekly price against its 200-week MA.
    pub weekly200: Crossover,
}
