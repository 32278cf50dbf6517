//! Reasoning service client for ETA estimation
//!
//! Invokes an OpenAI-compatible chat-completions endpoint with a fixed,
//! versioned instruction describing the speed/weather policy, and holds the
//! service to a strict-JSON response contract: the reply must parse as an
//! array of estimates or the whole call is treated as unavailable. A
//! partial or garbled result is never silently accepted.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{EtaEstimate, ReasoningRequestItem, WeatherSnapshot};
use std::time::Duration;

use crate::config::ReasoningConfig;
use crate::error::{AppError, AppResult};
use crate::services::eta_policy::{
    SpeedTable, MAX_TOTAL_REDUCTION, MODERATE_WIND_KPH, MODERATE_WIND_REDUCTION, POLICY_VERSION,
    PRECIPITATION_KEYWORDS, PRECIPITATION_REDUCTION, STRONG_WIND_KPH, STRONG_WIND_REDUCTION,
};

/// The narrow seam the pipeline depends on. The live client implements it;
/// tests swap in a deterministic implementation of the same policy.
#[async_trait]
pub trait EtaEstimator: Send + Sync {
    async fn estimate(
        &self,
        items: &[ReasoningRequestItem],
        weather: &WeatherSnapshot,
    ) -> AppResult<Vec<EtaEstimate>>;
}

/// Client for the external reasoning service
#[derive(Clone)]
pub struct ReasoningClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
    instruction: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl ReasoningClient {
    pub fn new(config: &ReasoningConfig, speeds: &SpeedTable) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("reasoning client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            instruction: build_instruction(speeds),
        })
    }

    async fn call(&self, payload: &serde_json::Value) -> AppResult<String> {
        let payload_str = payload.to_string();
        let body = ChatCompletionRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &payload_str,
                },
            ],
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Reasoning(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Reasoning(format!(
                "service returned {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Reasoning(format!("failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Reasoning("response contained no choices".to_string()))
    }
}

#[async_trait]
impl EtaEstimator for ReasoningClient {
    async fn estimate(
        &self,
        items: &[ReasoningRequestItem],
        weather: &WeatherSnapshot,
    ) -> AppResult<Vec<EtaEstimate>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let payload = serde_json::json!({
            "vessels": items,
            "weather": weather,
        });

        let content = self.call(&payload).await?;
        parse_estimates(&content)
    }
}

/// The instruction sent as the system message. Embeds the full policy so
/// the service applies it instead of inventing its own model.
fn build_instruction(speeds: &SpeedTable) -> String {
    let mut baselines: Vec<(&String, &f64)> = speeds.baselines().iter().collect();
    baselines.sort_by(|a, b| a.0.cmp(b.0));
    let baseline_lines = baselines
        .iter()
        .map(|(operator, kph)| format!("{}={} km/h", operator, kph))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You estimate ferry arrival times at their nearest dock.\n\
         Apply ETA policy {version} exactly as written; do not invent your own model.\n\
         - Baseline cruising speed by operator: {baselines}. \
         Operators not listed use {default} km/h.\n\
         - If weather wind_speed_kph >= {strong_kph}, reduce speed by {strong_pct}%. \
         Otherwise, if wind_speed_kph >= {moderate_kph}, reduce speed by {moderate_pct}%. \
         The two wind bands are mutually exclusive, never additive.\n\
         - If the weather condition_text contains any of [{keywords}] \
         (case-insensitive), reduce speed by a further {precip_pct}%.\n\
         - Cap the total reduction at {cap_pct}%: effective speed is never \
         below half of baseline.\n\
         - eta_minutes = distance_km / effective_speed_kph * 60.\n\
         For each vessel in the input produce exactly one object with keys \
         vessel_id, nearest_dock, eta_minutes (number), confidence (number \
         in [0,1]), notes (short string). Copy vessel_id and nearest_dock \
         from the input unchanged.\n\
         Respond with a strict JSON array only: no prose, no markdown fencing.",
        version = POLICY_VERSION,
        baselines = baseline_lines,
        default = speeds.default_kph(),
        strong_kph = STRONG_WIND_KPH,
        strong_pct = STRONG_WIND_REDUCTION * 100.0,
        moderate_kph = MODERATE_WIND_KPH,
        moderate_pct = MODERATE_WIND_REDUCTION * 100.0,
        keywords = PRECIPITATION_KEYWORDS.join(", "),
        precip_pct = PRECIPITATION_REDUCTION * 100.0,
        cap_pct = MAX_TOTAL_REDUCTION * 100.0,
    )
}

/// Parse the service reply against the strict contract. Anything that is
/// not a plain JSON array of well-formed estimates is rejected whole.
fn parse_estimates(content: &str) -> AppResult<Vec<EtaEstimate>> {
    let estimates: Vec<EtaEstimate> = serde_json::from_str(content.trim())
        .map_err(|e| AppError::Reasoning(format!("non-conforming response: {}", e)))?;

    for estimate in &estimates {
        if !estimate.eta_minutes.is_finite() || estimate.eta_minutes < 0.0 {
            return Err(AppError::Reasoning(format!(
                "non-conforming eta_minutes {} for vessel {}",
                estimate.eta_minutes, estimate.vessel_id
            )));
        }
        if !(0.0..=1.0).contains(&estimate.confidence) {
            return Err(AppError::Reasoning(format!(
                "confidence {} out of range for vessel {}",
                estimate.confidence, estimate.vessel_id
            )));
        }
    }

    Ok(estimates)
}
