use bitcoin_tracker::config::Config;
use bitcoin_tracker::tui::{self, LogBuffer, LogMakeWriter};
use bitcoin_tracker::{app, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "bitcoin_tracker=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    if std::env::args().skip(1).any(|arg| arg == "--tui") {
        return run_dashboard(config).await;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Bitcoin Tracker on {}:{}", config.host, config.port);
    if config.upstream.lcw_api_key.is_none() {
        tracing::warn!("LCW_API_KEY is not set; current price requests will fail");
    }

    let addr = format!("{}:{}", config.host, config.port);
    let app = app(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Bitcoin Tracker listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run the terminal dashboard against a running server.
///
/// Log output goes to an in-memory buffer so it does not tear the alternate
/// screen.
async fn run_dashboard(config: Config) -> anyhow::Result<()> {
    let log_buffer = Arc::new(LogBuffer::new(500));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(LogMakeWriter::new(log_buffer.clone())),
        )
        .init();

    tui::run_tui(config.dashboard, log_buffer).await?;
    Ok(())
}
