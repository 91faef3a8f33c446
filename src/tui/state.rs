//! Dashboard state and log capture for the TUI.

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

use super::chart::ChartPanel;
use super::events::FetchOutcome;
use super::view::DashboardView;

/// In-memory ring of formatted log lines.
pub struct LogBuffer {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a line, evicting the oldest past capacity.
    pub fn push_line(&self, line: String) {
        let mut lines = self.lock();
        lines.push_back(line);
        while lines.len() > self.capacity {
            lines.pop_front();
        }
    }

    /// The most recent lines, oldest first, up to `limit`.
    pub fn recent(&self, limit: usize) -> Vec<String> {
        let lines = self.lock();
        let start = lines.len().saturating_sub(limit);
        lines.iter().skip(start).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Writer that splits tracing output into lines for a [`LogBuffer`].
pub struct LogWriter {
    buffer: Arc<LogBuffer>,
    line: Vec<u8>,
}

impl LogWriter {
    fn flush_line(&mut self) {
        if !self.line.is_empty() {
            let line = String::from_utf8_lossy(&self.line).into_owned();
            self.buffer.push_line(line);
            self.line.clear();
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &b in buf {
            if b == b'\n' {
                self.flush_line();
            } else {
                self.line.push(b);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_line();
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        self.flush_line();
    }
}

/// `MakeWriter` that routes a tracing subscriber into a [`LogBuffer`].
pub struct LogMakeWriter {
    buffer: Arc<LogBuffer>,
}

impl LogMakeWriter {
    pub fn new(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer }
    }
}

impl<'a> MakeWriter<'a> for LogMakeWriter {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            line: Vec::new(),
        }
    }
}

/// What the dashboard currently shows.
///
/// A failed fetch sets the error banner but keeps the last good view, so the
/// screen never blanks out between polls.
pub struct DashboardState {
    view: Option<DashboardView>,
    error: Option<String>,
    last_update: Option<DateTime<Local>>,
    pub daily_chart: ChartPanel,
    pub weekly_chart: ChartPanel,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            view: None,
            error: None,
            last_update: None,
            daily_chart: ChartPanel::new("Loading price history..."),
            weekly_chart: ChartPanel::new("Loading weekly trends..."),
        }
    }
}

impl DashboardState {
    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            Ok(payload) => {
                let view = DashboardView::from_payload(&payload);
                self.daily_chart.replace(view.daily_chart.clone());
                self.weekly_chart.replace(view.weekly_chart.clone());
                self.view = Some(view);
                self.error = None;
                self.last_update = Some(Local::now());
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        DashboardPayload, HistoricalSeries, IndicatorSet, PricePoint, SentimentReading,
        SignalState,
    };
    use chrono::NaiveDate;

    fn payload(price: f64) -> Box<DashboardPayload> {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        Box::new(DashboardPayload::new(
            price,
            SentimentReading {
                value: 55,
                classification: "Neutral".to_string(),
                timestamp: 1_709_510_400,
            },
            IndicatorSet::default(),
            SignalState::None,
            HistoricalSeries::new(vec![PricePoint::new(date, price)]),
        ))
    }

    #[test]
    fn test_log_buffer_capacity() {
        let buffer = LogBuffer::new(2);
        buffer.push_line("a".to_string());
        buffer.push_line("b".to_string());
        buffer.push_line("c".to_string());
        assert_eq!(buffer.recent(10), vec!["b", "c"]);
        assert_eq!(buffer.recent(1), vec!["c"]);
    }

    #[test]
    fn test_log_writer_splits_lines() {
        let buffer = Arc::new(LogBuffer::new(10));
        let make = LogMakeWriter::new(buffer.clone());

        let mut writer = make.make_writer();
        writer.write_all(b"first\nsecond\n\npartial").unwrap();
        assert_eq!(buffer.recent(10), vec!["first", "second"]);

        drop(writer);
        assert_eq!(buffer.recent(10), vec!["first", "second", "partial"]);
    }

    #[test]
    fn test_apply_success_replaces_charts() {
        let mut state = DashboardState::default();
        state.apply(Ok(payload(42_000.0)));
        state.apply(Ok(payload(43_000.0)));

        assert_eq!(state.view().unwrap().current_price, "$43,000.00");
        assert_eq!(state.daily_chart.generation(), 2);
        assert_eq!(state.weekly_chart.generation(), 2);
        assert!(state.error().is_none());
        assert!(state.last_update().is_some());
    }

    #[test]
    fn test_apply_failure_keeps_last_view() {
        let mut state = DashboardState::default();
        state.apply(Ok(payload(42_000.0)));
        let updated = state.last_update();

        state.apply(Err("server returned HTTP 500".to_string()));
        assert_eq!(state.error(), Some("server returned HTTP 500"));
        assert_eq!(state.view().unwrap().current_price, "$42,000.00");
        assert_eq!(state.last_update(), updated);
        assert_eq!(state.daily_chart.generation(), 1);

        state.apply(Ok(payload(44_000.0)));
        assert!(state.error().is_none());
    }
}
