//! Vessel position feed client

use reqwest::Client;
use serde::Deserialize;
use shared::VesselPosition;
use std::time::Duration;

use crate::config::PositionFeedConfig;
use crate::error::{AppError, AppResult};

const FEED: &str = "position feed";

/// Client for the upstream vessel position feed
#[derive(Clone)]
pub struct PositionFeedClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

/// Raw feed envelope: a JSON object wrapping the list of vessel records.
#[derive(Debug, Deserialize)]
struct PositionFeedResponse {
    #[serde(default)]
    response: Vec<serde_json::Value>,
}

impl PositionFeedClient {
    pub fn new(config: &PositionFeedConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("position feed client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: String, api_key: String) -> AppResult<Self> {
        Self::new(&PositionFeedConfig {
            base_url,
            api_key,
            timeout_secs: 10,
        })
    }

    /// Fetch the current vessel positions.
    ///
    /// Records that do not parse as a vessel position are skipped with a
    /// warning rather than failing the whole feed; the fleet filter would
    /// discard most of them anyway.
    pub async fn fetch_positions(&self) -> AppResult<Vec<VesselPosition>> {
        let url = format!("{}/positions", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                feed: FEED,
                message: format!("request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamStatus {
                feed: FEED,
                status,
                body,
            });
        }

        let payload: PositionFeedResponse =
            response.json().await.map_err(|e| AppError::Upstream {
                feed: FEED,
                message: format!("failed to parse response: {}", e),
            })?;

        let mut vessels = Vec::with_capacity(payload.response.len());
        for record in payload.response {
            match serde_json::from_value::<VesselPosition>(record) {
                Ok(vessel) => vessels.push(vessel),
                Err(e) => tracing::warn!("Skipping malformed vessel record: {}", e),
            }
        }

        Ok(vessels)
    }
}
