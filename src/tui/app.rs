//! Main TUI application logic.

use super::client::DashboardClient;
use super::events::{self, Event, EventHandler};
use super::state::{DashboardState, LogBuffer};
use super::{dashboard, logs, Route, Theme};
use crate::config::DashboardConfig;
use crate::services::Poller;
use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame, Terminal,
};
use std::{io, sync::Arc, time::Duration};
use tracing::{info, warn};

/// Main TUI application.
pub struct App {
    current_route: Route,
    state: DashboardState,
    log_buffer: Arc<LogBuffer>,
    poller: Option<Poller>,
    theme: Theme,
    should_quit: bool,
}

impl App {
    /// Create a new TUI application. Without a poller, `r` does nothing.
    pub fn new(log_buffer: Arc<LogBuffer>, poller: Option<Poller>) -> Self {
        Self {
            current_route: Route::Dashboard,
            state: DashboardState::default(),
            log_buffer,
            poller,
            theme: Theme::default(),
            should_quit: false,
        }
    }

    /// Handle an event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if events::is_quit(&key) {
                    self.should_quit = true;
                    return;
                }

                if events::is_refresh(&key) {
                    if let Some(poller) = &self.poller {
                        info!("Manual refresh requested");
                        poller.trigger();
                    }
                    return;
                }

                // Route navigation
                for route in Route::all() {
                    if events::is_key(&key, KeyCode::Char(route.key())) {
                        self.current_route = route;
                        return;
                    }
                }
            }
            Event::Fetched(outcome) => {
                if let Err(e) = &outcome {
                    warn!("Dashboard refresh failed: {}", e);
                }
                self.state.apply(outcome);
            }
            Event::Tick | Event::Resize(_, _) => {}
        }
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn current_route(&self) -> Route {
        self.current_route
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Stop background polling and wait for it to wind down.
    pub async fn shutdown(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop().await;
        }
    }

    /// Render the TUI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        self.render_tabs(frame, chunks[0]);

        match self.current_route {
            Route::Dashboard => dashboard::render(frame, chunks[1], &self.state, &self.theme),
            Route::Logs => logs::render(frame, chunks[1], &self.log_buffer, &self.theme),
        }

        self.render_status_bar(frame, chunks[2]);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let routes = Route::all();
        let titles: Vec<Line> = routes
            .iter()
            .map(|r| {
                Line::from(vec![
                    Span::styled(format!("[{}] ", r.key()), self.theme.muted()),
                    Span::raw(r.name().to_string()),
                ])
            })
            .collect();

        let selected = routes
            .iter()
            .position(|r| *r == self.current_route)
            .unwrap_or(0);

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("Navigation"))
            .select(selected)
            .style(self.theme.tab_inactive())
            .highlight_style(self.theme.tab_active());

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let text = Line::from(vec![
            Span::styled("Bitcoin Tracker", self.theme.title()),
            Span::raw(" | "),
            Span::styled("q", self.theme.muted()),
            Span::raw(" or "),
            Span::styled("Ctrl+C", self.theme.muted()),
            Span::raw(" to quit | "),
            Span::styled("r", self.theme.muted()),
            Span::raw(" to refresh | "),
            Span::styled("1-2", self.theme.muted()),
            Span::raw(" to switch views"),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border());
        frame.render_widget(block, area);

        let inner = Rect {
            x: area.x + 2,
            y: area.y + 1,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        frame.render_widget(text, inner);
    }
}

/// Run the terminal dashboard until the user quits.
pub async fn run_tui(config: DashboardConfig, log_buffer: Arc<LogBuffer>) -> anyhow::Result<()> {
    let client = Arc::new(DashboardClient::new(&config.server_url)?);
    info!(
        "Polling {} every {}s",
        client.endpoint(),
        config.poll_interval.as_secs()
    );

    let mut event_handler = EventHandler::new(Duration::from_millis(250));
    let tx = event_handler.sender();
    let poller = Poller::start(config.poll_interval, move || {
        let client = client.clone();
        let tx = tx.clone();
        async move {
            let outcome = client
                .fetch()
                .await
                .map(Box::new)
                .map_err(|e| format!("{:#}", e));
            let _ = tx.send(Event::Fetched(outcome));
        }
    });

    let mut app = App::new(log_buffer, Some(poller));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app, &mut event_handler).await;
    app.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(result?)
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut EventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        match events.next().await {
            Some(event) => app.handle_event(event),
            None => return Ok(()),
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
