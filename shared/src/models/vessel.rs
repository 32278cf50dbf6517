//! Vessel telemetry models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Eta;

/// One vessel-position telemetry sample from the upstream feed.
///
/// Only the fields the pipeline needs are typed; everything else the feed
/// publishes (callsign, mmsi, heading, ...) is captured in `extra` and
/// preserved unmodified through enrichment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VesselPosition {
    #[serde(rename = "vessel")]
    pub vessel_id: String,
    pub operator: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(rename = "timestamp")]
    pub observed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A vessel position enriched with its nearest dock and ETA judgment.
///
/// The `eta` field is always present; a degraded result nulls out
/// `eta.minutes` rather than omitting the field, so consumers see a
/// stable shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedVessel {
    #[serde(flatten)]
    pub position: VesselPosition,
    pub nearest_dock: String,
    pub distance_km: f64,
    pub eta: Eta,
}
