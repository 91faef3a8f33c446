//! Theme and color definitions for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::types::SignalState;

/// Theme for the TUI with consistent color scheme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Magenta,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            info: Color::Blue,
            muted: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Get style for titles.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for headers.
    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.danger)
    }

    pub fn info(&self) -> Style {
        Style::default().fg(self.info)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Get style for tabs (active).
    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for tabs (inactive).
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Signal card colors: green buy, red sell, muted while waiting.
    pub fn signal(&self, signal: SignalState) -> Style {
        match signal {
            SignalState::Buy => self.success().add_modifier(Modifier::BOLD),
            SignalState::Sell => self.error().add_modifier(Modifier::BOLD),
            SignalState::None => self.muted(),
        }
    }

    /// Gauge color for a Fear & Greed value, red at extreme fear to green at
    /// extreme greed.
    pub fn sentiment(&self, value: u8) -> Style {
        let color = match value {
            0..=24 => self.danger,
            25..=44 => Color::LightRed,
            45..=55 => self.warning,
            56..=75 => Color::LightGreen,
            _ => self.success,
        };
        Style::default().fg(color)
    }

    /// Line color for the i-th series of a chart.
    pub fn series(&self, index: usize) -> Style {
        let color = match index % 3 {
            0 => self.primary,
            1 => self.warning,
            _ => self.secondary,
        };
        Style::default().fg(color)
    }
}
