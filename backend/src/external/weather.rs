//! Weather feed client for current conditions
//!
//! Fetches `current.json` for the configured location. The raw object is
//! kept as-is: the boundary passes it through to the caller, and the
//! reasoning payload projects a `WeatherSnapshot` from it.

use reqwest::Client;
use std::time::Duration;

use crate::config::WeatherFeedConfig;
use crate::error::{AppError, AppResult};

const FEED: &str = "weather feed";

/// Client for the upstream weather feed
#[derive(Clone)]
pub struct WeatherFeedClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    location: String,
}

impl WeatherFeedClient {
    pub fn new(config: &WeatherFeedConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("weather feed client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            location: config.location.clone(),
        })
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: String, api_key: String, location: String) -> AppResult<Self> {
        Self::new(&WeatherFeedConfig {
            base_url,
            api_key,
            location,
            timeout_secs: 10,
        })
    }

    /// Fetch current conditions for the fixed location, as the raw feed object.
    pub async fn fetch_current(&self) -> AppResult<serde_json::Value> {
        let url = format!("{}/current.json", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", self.location.as_str())])
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

        response.json().await.map_err(|e| AppError::Upstream {
            feed: FEED,
            message: format!("failed to parse response: {}", e),
        })
    }
}
