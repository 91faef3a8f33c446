//! Bitcoin Tracker - price, sentiment and indicator aggregation server

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod tui;
pub mod types;

use axum::Router;
use config::Config;
use services::DashboardAggregator;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// Re-export commonly used types
pub use types::*;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub aggregator: Arc<DashboardAggregator>,
}

impl AppState {
    /// Build state with the real upstream clients.
    pub fn from_config(config: Config) -> Self {
        let aggregator = Arc::new(DashboardAggregator::from_config(&config));
        Self {
            config: Arc::new(config),
            aggregator,
        }
    }
}

/// Build the HTTP application with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
