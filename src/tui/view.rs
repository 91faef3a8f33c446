//! View model derived from one dashboard payload.

use crate::services::explain_signal;
use crate::services::indicators::{crossover_report, resample_weekly, Sma};
use crate::types::{CrossoverReport, DashboardPayload, SentimentReading, SignalState};

use super::chart::{ChartData, ChartSeries};

const NOT_AVAILABLE: &str = "N/A";

/// Everything the dashboard panels display.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub current_price: String,
    pub sentiment: SentimentReading,
    pub rsi: String,
    pub ma50: String,
    pub ma200: String,
    pub signal: SignalState,
    pub signal_text: String,
    pub crossovers: CrossoverReport,
    pub daily_chart: ChartData,
    pub weekly_chart: ChartData,
}

impl DashboardView {
    pub fn from_payload(payload: &DashboardPayload) -> Self {
        let points = payload.historical_data.points();
        let weekly = resample_weekly(points);
        let signal = payload.signal();

        let daily_prices = payload.historical_data.prices();
        let daily_chart = ChartData {
            title: "Bitcoin Price History".to_string(),
            dates: payload.historical_data.dates(),
            series: vec![
                ChartSeries::new("Price", daily_prices.iter().copied().map(Some).collect()),
                ChartSeries::new("50-Day MA", Sma::lenient(50).series(&daily_prices)),
                ChartSeries::new("200-Day MA", Sma::lenient(200).series(&daily_prices)),
            ],
        };

        let weekly_prices: Vec<f64> = weekly.iter().map(|w| w.price).collect();
        let weekly_chart = ChartData {
            title: "Weekly Price Trends".to_string(),
            dates: weekly.iter().map(|w| w.week_start).collect(),
            series: vec![
                ChartSeries::new("Weekly Price", weekly_prices.iter().copied().map(Some).collect()),
                ChartSeries::new("50-Week MA", Sma::lenient(50).series(&weekly_prices)),
                ChartSeries::new("200-Week MA", Sma::lenient(200).series(&weekly_prices)),
            ],
        };

        Self {
            current_price: format_usd(payload.current_price),
            sentiment: payload.fear_greed_index.clone(),
            rsi: or_not_available(&payload.rsi),
            ma50: dollars_or_not_available(&payload.ma50),
            ma200: dollars_or_not_available(&payload.ma200),
            signal,
            signal_text: explain_signal(signal, payload.fear_greed_index.value, payload.rsi_value()),
            crossovers: crossover_report(points, &weekly),
            daily_chart,
            weekly_chart,
        }
    }
}

fn or_not_available(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn dollars_or_not_available(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("${}", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `$67,123.45` style formatting.
pub fn format_usd(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Crossover, HistoricalSeries, IndicatorSet, PricePoint};
    use chrono::NaiveDate;

    fn payload(days: usize, indicators: IndicatorSet, signal: SignalState) -> DashboardPayload {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let points = (0..days)
            .map(|i| PricePoint::new(start + chrono::Duration::days(i as i64), 20_000.0 + i as f64))
            .collect();
        DashboardPayload::new(
            67_123.456,
            SentimentReading {
                value: 15,
                classification: "Extreme Fear".to_string(),
                timestamp: 1_700_000_000,
            },
            indicators,
            signal,
            HistoricalSeries::new(points),
        )
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(67_123.456), "$67,123.46");
        assert_eq!(format_usd(999.0), "$999.00");
        assert_eq!(format_usd(1_000.0), "$1,000.00");
        assert_eq!(format_usd(1_234_567.8), "$1,234,567.80");
        assert_eq!(format_usd(-42.5), "-$42.50");
    }

    #[test]
    fn test_absent_indicators_render_not_available() {
        let view = DashboardView::from_payload(&payload(10, IndicatorSet::default(), SignalState::None));
        assert_eq!(view.rsi, "N/A");
        assert_eq!(view.ma50, "N/A");
        assert_eq!(view.ma200, "N/A");
        assert!(view.signal_text.contains("currently N/A"));
        assert_eq!(view.crossovers.daily, Crossover::InsufficientData);
        assert_eq!(view.crossovers.weekly50, Crossover::InsufficientData);
    }

    #[test]
    fn test_present_indicators() {
        let indicators = IndicatorSet {
            rsi: Some(25.5),
            ma50: Some(41_000.0),
            ma200: Some(38_500.25),
        };
        let view = DashboardView::from_payload(&payload(30, indicators, SignalState::Buy));
        assert_eq!(view.current_price, "$67,123.46");
        assert_eq!(view.rsi, "25.50");
        assert_eq!(view.ma50, "$41000.00");
        assert_eq!(view.ma200, "$38500.25");
        assert_eq!(view.signal, SignalState::Buy);
        assert!(view.signal_text.starts_with("BUY"));
    }

    #[test]
    fn test_charts_cover_whole_history() {
        let view = DashboardView::from_payload(&payload(365, IndicatorSet::default(), SignalState::None));

        let daily = &view.daily_chart;
        assert_eq!(daily.dates.len(), 365);
        assert_eq!(daily.series.len(), 3);
        // Lenient running MAs have no leading gaps.
        assert!(daily.series.iter().all(|s| s.values.iter().all(Option::is_some)));

        // 2023-01-02 is a Monday, so 365 days span 53 ISO weeks.
        let weekly = &view.weekly_chart;
        assert_eq!(weekly.dates.len(), 53);
        assert!(weekly.dates.iter().all(|d| d.format("%a").to_string() == "Mon"));
    }

    #[test]
    fn test_rising_history_reports_crossovers() {
        let view = DashboardView::from_payload(&payload(365, IndicatorSet::default(), SignalState::None));
        // A strictly rising series never crosses: MA50 stays above MA200.
        assert_eq!(view.crossovers.daily, Crossover::NoCrossover);
        assert_eq!(view.crossovers.weekly50, Crossover::NoCrossover);
        // 53 weeks can never satisfy the 200-week window.
        assert_eq!(view.crossovers.weekly200, Crossover::InsufficientData);
    }
}
