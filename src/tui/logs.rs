//! Logs view - captured tracing output.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::{LogBuffer, Theme};

/// Render the newest log lines first.
pub fn render(frame: &mut Frame, area: Rect, log_buffer: &LogBuffer, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Logs")
        .border_style(theme.border());

    let visible = area.height.saturating_sub(2) as usize;
    let lines = log_buffer.recent(visible);
    if lines.is_empty() {
        let empty = Paragraph::new(Span::styled("No logs yet.", theme.muted()))
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = lines
        .into_iter()
        .rev()
        .map(|line| {
            let style = if line.contains("ERROR") {
                theme.error()
            } else if line.contains("WARN") {
                theme.warning()
            } else if line.contains("INFO") {
                theme.success()
            } else {
                theme.muted()
            };
            ListItem::new(Line::from(Span::styled(line, style)))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
