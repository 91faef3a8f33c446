//! Event handling for the TUI.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::types::DashboardPayload;

/// Outcome of one dashboard fetch, as delivered to the UI loop.
pub type FetchOutcome = Result<Box<DashboardPayload>, String>;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal event (keyboard input).
    Key(KeyEvent),
    /// Tick event for periodic redraws.
    Tick,
    /// Resize event.
    Resize(u16, u16),
    /// A poll of the dashboard server finished.
    Fetched(FetchOutcome),
}

/// Merges terminal input and fetch results onto one channel.
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Start reading terminal input on a dedicated thread.
    ///
    /// `crossterm::event::poll` blocks, so it stays off the async runtime. The
    /// thread exits once the handler is dropped.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        std::thread::spawn(move || loop {
            let event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                    Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                    _ => continue,
                }
            } else {
                Event::Tick
            };

            if event_tx.send(event).is_err() {
                break;
            }
        });

        Self { tx, rx }
    }

    /// Sender for producers outside the input thread.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Receive the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Check if a key event matches a specific key code.
pub fn is_key(event: &KeyEvent, code: KeyCode) -> bool {
    event.code == code && event.modifiers == KeyModifiers::NONE
}

/// Check if a key event is `q` or Ctrl+C.
pub fn is_quit(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers == KeyModifiers::CONTROL
        || is_key(event, KeyCode::Char('q'))
}

/// Check if a key event asks for an immediate refresh.
pub fn is_refresh(event: &KeyEvent) -> bool {
    is_key(event, KeyCode::Char('r'))
}
