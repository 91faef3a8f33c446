use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream data source identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamSource {
    /// Daily OHLC history.
    Kraken,
    /// Live spot price.
    LiveCoinWatch,
    /// Fear & Greed sentiment index.
    FearGreed,
}

impl UpstreamSource {
    /// What this source contributes to the dashboard.
    pub fn dataset(&self) -> &'static str {
        match self {
            UpstreamSource::Kraken => "historical prices",
            UpstreamSource::LiveCoinWatch => "current price",
            UpstreamSource::FearGreed => "fear & greed index",
        }
    }
}

impl fmt::Display for UpstreamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamSource::Kraken => write!(f, "kraken"),
            UpstreamSource::LiveCoinWatch => write!(f, "livecoinwatch"),
            UpstreamSource::FearGreed => write!(f, "feargreed"),
        }
    }
}

/// Daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Chronological daily price history.
///
/// Construction sorts by date and keeps the last point for any duplicated
/// date, so consumers can rely on strictly ascending dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalSeries {
    points: Vec<PricePoint>,
}

impl HistoricalSeries {
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        // Stable sort keeps upstream order among equal dates, so the later
        // candle wins the dedup below.
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self { points: deduped }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closing prices in date order.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Dates in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Keep only the most recent `limit` points.
    pub fn truncate_to_recent(self, limit: usize) -> Self {
        let start = self.points.len().saturating_sub(limit);
        Self {
            points: self.points[start..].to_vec(),
        }
    }
}

/// One calendar week (ISO, Monday start) of averaged daily prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPoint {
    /// Monday of the ISO week.
    pub week_start: NaiveDate,
    /// Mean of the daily prices that fell in this week.
    pub price: f64,
    /// Number of daily points averaged.
    pub days: usize,
}
