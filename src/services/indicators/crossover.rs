//! Crossover detection between two aligned series.
//!
//! Moving averages are computed once in a forward pass; the scan then walks
//! backwards over adjacent pairs, so the whole detection is linear.

use chrono::NaiveDate;

use super::sma::Sma;
use crate::types::{Crossover, CrossoverReport, PricePoint, WeeklyPoint};

/// Daily points required before the MA50/MA200 crossover is meaningful.
pub const DAILY_MIN_POINTS: usize = 200;
/// Weekly points required for the price/MA50-week crossover.
pub const WEEKLY_50_MIN_POINTS: usize = 50;
/// Weekly points required for the price/MA200-week crossover.
pub const WEEKLY_200_MIN_POINTS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Above,
    Below,
}

fn side(fast: Option<f64>, slow: Option<f64>) -> Option<Side> {
    let (fast, slow) = (fast?, slow?);
    if fast > slow {
        Some(Side::Above)
    } else if fast < slow {
        Some(Side::Below)
    } else {
        None
    }
}

/// Most recent date at which `fast` crossed `slow`.
///
/// A crossing needs strict inequality on both of two consecutive points with
/// opposite signs; equal or absent values never count. Returns
/// [`Crossover::InsufficientData`] when fewer than `min_points` are given.
pub fn detect_crossover(
    dates: &[NaiveDate],
    fast: &[Option<f64>],
    slow: &[Option<f64>],
    min_points: usize,
) -> Crossover {
    let len = dates.len().min(fast.len()).min(slow.len());
    if len < min_points.max(2) {
        return Crossover::InsufficientData;
    }

    for i in (1..len).rev() {
        let prev = side(fast[i - 1], slow[i - 1]);
        let curr = side(fast[i], slow[i]);
        match (prev, curr) {
            (Some(Side::Below), Some(Side::Above)) => return Crossover::above(dates[i]),
            (Some(Side::Above), Some(Side::Below)) => return Crossover::below(dates[i]),
            _ => {}
        }
    }

    Crossover::NoCrossover
}

/// Last crossover of the daily MA50 over the daily MA200.
pub fn daily_ma_crossover(daily: &[PricePoint]) -> Crossover {
    let prices: Vec<f64> = daily.iter().map(|p| p.price).collect();
    let dates: Vec<NaiveDate> = daily.iter().map(|p| p.date).collect();
    let ma50 = Sma::strict(50).series(&prices);
    let ma200 = Sma::strict(200).series(&prices);
    detect_crossover(&dates, &ma50, &ma200, DAILY_MIN_POINTS)
}

/// Last crossover of the weekly price over its `period`-week MA.
pub fn weekly_price_crossover(weekly: &[WeeklyPoint], period: usize) -> Crossover {
    let prices: Vec<f64> = weekly.iter().map(|w| w.price).collect();
    let dates: Vec<NaiveDate> = weekly.iter().map(|w| w.week_start).collect();
    let price_series: Vec<Option<f64>> = prices.iter().copied().map(Some).collect();
    let ma = Sma::strict(period).series(&prices);
    detect_crossover(&dates, &price_series, &ma, period)
}

/// Daily and weekly crossovers for the dashboard.
///
/// Weekly checks only run once the daily history itself clears the daily
/// minimum, so a short history reports insufficient data everywhere.
pub fn crossover_report(daily: &[PricePoint], weekly: &[WeeklyPoint]) -> CrossoverReport {
    if daily.len() < DAILY_MIN_POINTS {
        return CrossoverReport {
            daily: Crossover::InsufficientData,
            weekly50: Crossover::InsufficientData,
            weekly200: Crossover::InsufficientData,
        };
    }

    CrossoverReport {
        daily: daily_ma_crossover(daily),
        weekly50: weekly_price_crossover(weekly, WEEKLY_50_MIN_POINTS),
        weekly200: weekly_price_crossover(weekly, WEEKLY_200_MIN_POINTS),
    }
}
