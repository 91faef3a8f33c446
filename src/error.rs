use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::types::UpstreamSource;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    /// An upstream source was unreachable, returned non-2xx, reported an
    /// error, or sent a body we could not interpret.
    #[error("{upstream} ({}) fetch failed: {message}", .upstream.dataset())]
    UpstreamFetch {
        upstream: UpstreamSource,
        message: String,
    },
}

impl AppError {
    pub fn upstream(upstream: UpstreamSource, message: impl Into<String>) -> Self {
        AppError::UpstreamFetch {
            upstream,
            message: message.into(),
        }
    }

    /// Adapter for `map_err` on reqwest calls.
    pub fn from_reqwest(upstream: UpstreamSource) -> impl Fn(reqwest::Error) -> Self {
        move |e| AppError::upstream(upstream, e.to_string())
    }

    pub fn upstream_source(&self) -> UpstreamSource {
        match self {
            AppError::UpstreamFetch { upstream, .. } => *upstream,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every failure of the aggregation is reported the same way; the
        // detail string says which source broke.
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = Json(json!({
            "error": "Failed to fetch Bitcoin data",
            "details": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
