//! HTTP client for the dashboard server.

use anyhow::{bail, Context};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::types::DashboardPayload;

/// Long enough to cover the server's own slowest upstream call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

/// Error body returned by the server on a failed aggregation.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    details: Option<String>,
}

/// Fetches [`DashboardPayload`]s from a running server.
#[derive(Clone)]
pub struct DashboardClient {
    client: Client,
    endpoint: String,
}

impl DashboardClient {
    pub fn new(server_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build dashboard HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint_url(server_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch(&self) -> anyhow::Result<DashboardPayload> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .with_context(|| format!("could not reach {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.ok();
            bail!(describe_failure(status, body));
        }

        response
            .json::<DashboardPayload>()
            .await
            .context("malformed dashboard payload")
    }
}

fn endpoint_url(server_url: &str) -> String {
    format!("{}/api/bitcoin-data", server_url.trim_end_matches('/'))
}

fn describe_failure(status: StatusCode, body: Option<ErrorBody>) -> String {
    match body {
        Some(ErrorBody {
            error,
            details: Some(details),
        }) => format!("{}: {}", error, details),
        Some(ErrorBody { error, .. }) => error,
        None => format!("server returned HTTP {}", status),
    }
}
