//! Daily to weekly resampling.
//!
//! Weeks follow ISO 8601: they start on Monday and each week is anchored on
//! its Monday date, even when the first data point falls later in the week.
//! Both the weekly chart and weekly crossover detection use this grouping.

use chrono::{Datelike, Duration, NaiveDate};

use crate::types::{PricePoint, WeeklyPoint};

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Group chronological daily prices into weekly means.
///
/// Emits one entry per week with at least one point, in date order.
pub fn resample_weekly(daily: &[PricePoint]) -> Vec<WeeklyPoint> {
    let mut weeks: Vec<WeeklyPoint> = Vec::new();
    let mut current: Option<(NaiveDate, f64, usize)> = None;

    for point in daily {
        let anchor = week_start(point.date);
        match current.as_mut() {
            Some((start, sum, days)) if *start == anchor => {
                *sum += point.price;
                *days += 1;
            }
            _ => {
                if let Some(done) = current.take() {
                    weeks.push(close_week(done));
                }
                current = Some((anchor, point.price, 1));
            }
        }
    }

    if let Some(done) = current {
        weeks.push(close_week(done));
    }

    weeks
}

fn close_week((week_start, sum, days): (NaiveDate, f64, usize)) -> WeeklyPoint {
    WeeklyPoint {
        week_start,
        price: sum / days as f64,
        days,
    }
}
