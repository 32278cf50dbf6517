//! ETA estimation models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::EnrichedVessel;

/// One vessel summary sent to the reasoning service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReasoningRequestItem {
    pub vessel_id: String,
    pub operator: String,
    pub observed_at: DateTime<Utc>,
    pub nearest_dock: String,
    /// Great-circle distance to the nearest dock, rounded to 3 decimals.
    pub distance_km: f64,
}

/// One ETA judgment returned by the reasoning service.
///
/// Correlation back onto vessels is keyed by `(vessel_id, nearest_dock)`,
/// not vessel alone: the nearest dock is recomputed independently on both
/// sides of the round trip and must match for correlation to succeed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EtaEstimate {
    pub vessel_id: String,
    pub nearest_dock: String,
    pub eta_minutes: f64,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub notes: String,
}

/// The ETA attached to an enriched vessel.
///
/// `minutes` is `None` on the fallback path; `notes` then carries a
/// human-readable reason for the degradation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Eta {
    pub minutes: Option<f64>,
    pub confidence: f64,
    pub notes: String,
}

impl Eta {
    /// The degraded-data fallback: no estimate, zero confidence, reason in notes.
    pub fn fallback(notes: impl Into<String>) -> Self {
        Self {
            minutes: None,
            confidence: 0.0,
            notes: notes.into(),
        }
    }
}

impl From<&EtaEstimate> for Eta {
    fn from(estimate: &EtaEstimate) -> Self {
        Self {
            minutes: Some(estimate.eta_minutes),
            confidence: estimate.confidence,
            notes: estimate.notes.clone(),
        }
    }
}

/// Response body of `GET /ferry_weather`.
///
/// `weather` is the raw upstream weather object, passed through unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FerryWeatherResponse {
    pub ferry_positions: Vec<EnrichedVessel>,
    pub weather: serde_json::Value,
}
