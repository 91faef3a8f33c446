//! Line chart panels for the dashboard.

use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::Theme;

/// One named line on a chart, aligned with the chart's dates.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub dates: Vec<NaiveDate>,
    pub series: Vec<ChartSeries>,
}

/// A chart built from [`ChartData`], ready to draw every frame.
#[derive(Debug)]
pub struct RenderedChart {
    title: String,
    lines: Vec<(String, Vec<(f64, f64)>)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_labels: Vec<String>,
    y_labels: Vec<String>,
}

impl RenderedChart {
    fn build(data: ChartData) -> Self {
        let lines: Vec<(String, Vec<(f64, f64)>)> = data
            .series
            .into_iter()
            .map(|series| {
                let points = series
                    .values
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
                    .collect();
                (series.name, points)
            })
            .collect();

        let x_max = data.dates.len().saturating_sub(1) as f64;
        let y_bounds = value_bounds(lines.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1)));

        let x_labels = match (data.dates.first(), data.dates.last()) {
            (Some(first), Some(last)) => {
                let mid = data.dates[data.dates.len() / 2];
                [*first, mid, *last]
                    .iter()
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .collect()
            }
            _ => Vec::new(),
        };
        let y_labels = vec![
            format!("{:.0}", y_bounds[0]),
            format!("{:.0}", (y_bounds[0] + y_bounds[1]) / 2.0),
            format!("{:.0}", y_bounds[1]),
        ];

        Self {
            title: data.title,
            lines,
            x_bounds: [0.0, x_max.max(1.0)],
            y_bounds,
            x_labels,
            y_labels,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of plotted points per line.
    pub fn point_counts(&self) -> Vec<usize> {
        self.lines.iter().map(|(_, pts)| pts.len()).collect()
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let datasets: Vec<Dataset> = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, (name, points))| {
                Dataset::default()
                    .name(name.as_str())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(theme.series(i))
                    .data(points)
            })
            .collect();

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title.as_str())
                    .border_style(theme.border()),
            )
            .x_axis(
                Axis::default()
                    .style(theme.muted())
                    .bounds(self.x_bounds)
                    .labels(self.x_labels.iter().map(|l| Span::raw(l.as_str())).collect()),
            )
            .y_axis(
                Axis::default()
                    .style(theme.muted())
                    .bounds(self.y_bounds)
                    .labels(self.y_labels.iter().map(|l| Span::raw(l.as_str())).collect()),
            );

        frame.render_widget(chart, area);
    }
}

/// Min/max of the plotted values with a little headroom.
fn value_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if min == max {
        return [min - 1.0, max + 1.0];
    }
    let pad = (max - min) * 0.02;
    [min - pad, max + pad]
}

/// Owns at most one rendered chart.
///
/// `replace` drops the current chart before building its successor, so two
/// instances never coexist for the same panel.
#[derive(Debug)]
pub struct ChartPanel {
    placeholder: String,
    chart: Option<RenderedChart>,
    generation: u64,
}

impl ChartPanel {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            chart: None,
            generation: 0,
        }
    }

    pub fn replace(&mut self, data: ChartData) {
        self.chart = None;
        self.chart = Some(RenderedChart::build(data));
        self.generation += 1;
    }

    pub fn clear(&mut self) {
        self.chart = None;
    }

    pub fn chart(&self) -> Option<&RenderedChart> {
        self.chart.as_ref()
    }

    /// How many times a chart has been built into this panel.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match &self.chart {
            Some(chart) => chart.render(frame, area, theme),
            None => {
                let block = Paragraph::new(Span::styled(self.placeholder.as_str(), theme.muted()))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(theme.muted)),
                    )
                    .alignment(Alignment::Center);
                frame.render_widget(block, area);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn data(title: &str, values: Vec<Option<f64>>) -> ChartData {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ChartData {
            title: title.to_string(),
            dates: (0..values.len())
                .map(|i| start + chrono::Duration::days(i as i64))
                .collect(),
            series: vec![ChartSeries::new("Price", values)],
        }
    }

    #[test]
    fn test_replace_swaps_chart() {
        let mut panel = ChartPanel::new("Loading...");
        assert!(panel.chart().is_none());
        assert_eq!(panel.generation(), 0);

        panel.replace(data("first", vec![Some(1.0), Some(2.0)]));
        assert_eq!(panel.chart().map(RenderedChart::title), Some("first"));

        panel.replace(data("second", vec![Some(3.0)]));
        assert_eq!(panel.chart().map(RenderedChart::title), Some("second"));
        assert_eq!(panel.generation(), 2);
    }

    #[test]
    fn test_clear_keeps_generation() {
        let mut panel = ChartPanel::new("Loading...");
        panel.replace(data("first", vec![Some(1.0)]));
        panel.clear();
        assert!(panel.chart().is_none());
        assert_eq!(panel.generation(), 1);
    }

    #[test]
    fn test_absent_values_are_not_plotted() {
        let mut panel = ChartPanel::new("");
        panel.replace(data("gaps", vec![None, Some(2.0), None, Some(4.0)]));
        assert_eq!(panel.chart().unwrap().point_counts(), vec![2]);
    }

    #[test]
    fn test_value_bounds() {
        let bounds = value_bounds([100.0, 200.0].into_iter());
        assert_relative_eq!(bounds[0], 98.0);
        assert_relative_eq!(bounds[1], 202.0);

        assert_eq!(value_bounds([5.0].into_iter()), [4.0, 6.0]);
        assert_eq!(value_bounds(std::iter::empty()), [0.0, 1.0]);
    }
}
