//! Dashboard view: price, sentiment, indicators, signal and charts.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use super::state::DashboardState;
use super::view::DashboardView;
use super::Theme;
use crate::types::{SentimentReading, SignalState};

/// Render the dashboard view.
pub fn render(frame: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme) {
    let banner_height = if state.error().is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // Error banner
            Constraint::Length(3),             // Price header
            Constraint::Length(8),             // Cards
            Constraint::Min(0),                // Charts
        ])
        .split(area);

    if let Some(error) = state.error() {
        render_error_banner(frame, chunks[0], error, theme);
    }

    let Some(view) = state.view() else {
        let loading = Paragraph::new(Span::styled("Loading Bitcoin data...", theme.muted()))
            .block(Block::default().borders(Borders::ALL).border_style(theme.border()))
            .alignment(Alignment::Center);
        frame.render_widget(loading, chunks[1].union(chunks[2]).union(chunks[3]));
        return;
    };

    render_header(frame, chunks[1], view, state, theme);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
        ])
        .split(chunks[2]);

    render_sentiment(frame, cards[0], &view.sentiment, theme);
    render_indicators(frame, cards[1], view, theme);
    render_signal(frame, cards[2], view, theme);
    render_crossovers(frame, cards[3], view, theme);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);

    state.daily_chart.render(frame, charts[0], theme);
    state.weekly_chart.render(frame, charts[1], theme);
}

fn render_error_banner(frame: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled("Error: ", theme.error()),
        Span::raw(error),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.error()),
    );
    frame.render_widget(banner, area);
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    view: &DashboardView,
    state: &DashboardState,
    theme: &Theme,
) {
    let updated = state
        .last_update()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let header = Paragraph::new(Line::from(vec![
        Span::styled("BTC/USD  ", theme.header()),
        Span::styled(view.current_price.as_str(), theme.title()),
        Span::raw("    "),
        Span::styled("Last update: ", theme.muted()),
        Span::raw(updated),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Bitcoin Tracker")
            .border_style(theme.border()),
    );
    frame.render_widget(header, area);
}

fn render_sentiment(frame: &mut Frame, area: Rect, sentiment: &SentimentReading, theme: &Theme) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Fear & Greed")
                .border_style(theme.border()),
        )
        .gauge_style(theme.sentiment(sentiment.value))
        .ratio(sentiment.ratio())
        .label(format!("{} - {}", sentiment.value, sentiment.classification));
    frame.render_widget(gauge, area);
}

fn render_indicators(frame: &mut Frame, area: Rect, view: &DashboardView, theme: &Theme) {
    let row = |label: &'static str, value: &str| {
        Line::from(vec![
            Span::styled(label, theme.muted()),
            Span::styled(value.to_string(), theme.info()),
        ])
    };

    let lines = vec![
        row("RSI (14): ", &view.rsi),
        row("50-Day MA: ", &view.ma50),
        row("200-Day MA: ", &view.ma200),
    ];

    let block = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Indicators")
            .border_style(theme.border()),
    );
    frame.render_widget(block, area);
}

fn render_signal(frame: &mut Frame, area: Rect, view: &DashboardView, theme: &Theme) {
    let style = theme.signal(view.signal);
    let headline = match view.signal {
        SignalState::None => "NO SIGNAL".to_string(),
        signal => format!("{} SIGNAL", signal.name()),
    };
    let mut lines = vec![Line::from(Span::styled(headline, style))];
    lines.extend(view.signal_text.lines().map(|l| Line::from(l.to_string())));

    let block = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Trading Signal")
                .border_style(style),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(block, area);
}

fn render_crossovers(frame: &mut Frame, area: Rect, view: &DashboardView, theme: &Theme) {
    let report = &view.crossovers;
    let row = |label: &'static str, value: String| {
        Line::from(vec![Span::styled(label, theme.muted()), Span::raw(value)])
    };

    let lines = vec![
        Line::from(Span::styled("50/200 Day MA", theme.header())),
        row("  ", report.daily.to_string()),
        Line::from(Span::styled("Price vs Weekly MA", theme.header())),
        row("  50w: ", report.weekly50.to_string()),
        row("  200w: ", report.weekly200.to_string()),
    ];

    let block = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Crossovers")
            .border_style(theme.border()),
    );
    frame.render_widget(block, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DashboardPayload, HistoricalSeries, IndicatorSet, PricePoint};
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal
            .draw(|f| render(f, f.size(), state, &Theme::default()))
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_render_loading() {
        let text = draw(&DashboardState::default());
        assert!(text.contains("Loading Bitcoin data..."));
    }

    #[test]
    fn test_render_payload_and_error_banner() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = (0..30)
            .map(|i| PricePoint::new(start + chrono::Duration::days(i), 40_000.0 + i as f64))
            .collect();
        let payload = DashboardPayload::new(
            43_210.0,
            SentimentReading {
                value: 15,
                classification: "Extreme Fear".to_string(),
                timestamp: 1_706_572_800,
            },
            IndicatorSet {
                rsi: Some(22.0),
                ma50: None,
                ma200: None,
            },
            SignalState::Buy,
            HistoricalSeries::new(points),
        );

        let mut state = DashboardState::default();
        state.apply(Ok(Box::new(payload)));
        let text = draw(&state);
        assert!(text.contains("$43,210.00"));
        assert!(text.contains("22.00"));
        assert!(text.contains("BUY SIGNAL"));
        assert!(text.contains("Insufficient data"));
        assert!(!text.contains("Error:"));

        state.apply(Err("server returned HTTP 500".to_string()));
        let text = draw(&state);
        assert!(text.contains("Error: server returned HTTP 500"));
        assert!(text.contains("$43,210.00"));
    }
}
