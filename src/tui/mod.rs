//! Terminal dashboard for the Bitcoin Tracker server.

mod app;
mod chart;
mod client;
mod dashboard;
mod events;
mod logs;
mod state;
mod theme;
mod view;

pub use app::{run_tui, App};
pub use chart::{ChartData, ChartPanel, ChartSeries, RenderedChart};
pub use client::DashboardClient;
pub use events::{Event, FetchOutcome};
pub use state::{DashboardState, LogBuffer, LogMakeWriter};
pub use theme::Theme;
pub use view::{format_usd, DashboardView};

/// Route/View enum for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Logs,
}

impl Route {
    /// Get all available routes.
    pub fn all() -> [Self; 2] {
        [Self::Dashboard, Self::Logs]
    }

    /// Get the route name.
    pub fn name(&self) -> &str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Logs => "Logs",
        }
    }

    /// Get the route shortcut key.
    pub fn key(&self) -> char {
        match self {
            Self::Dashboard => '1',
            Self::Logs => '2',
        }
    }
}
