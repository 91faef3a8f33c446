use crate::error::Result;
use crate::types::DashboardPayload;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use tracing::info;

/// Aggregate all upstream data into one dashboard payload.
async fn bitcoin_data(State(state): State<AppState>) -> Result<Json<DashboardPayload>> {
    let payload = state.aggregator.build_payload().await?;
    info!(
        "Serving dashboard payload with {} history points",
        payload.historical_data.len()
    );
    Ok(Json(payload))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/bitcoin-data", get(bitcoin_data))
}
