//! Pipeline orchestrator
//!
//! Sequences the whole per-request transform: concurrent upstream fetches,
//! fleet filter, payload build, reasoning call, merge. Three outcomes:
//! happy path, reasoning degraded (request still succeeds with null-ETA
//! fallbacks), upstream failure (request fails, status forwarded). Each
//! request is one execution; nothing here is shared mutable state.

use std::collections::HashSet;
use std::sync::Arc;

use shared::{FerryWeatherResponse, VesselPosition};

use crate::error::AppResult;
use crate::external::positions::PositionFeedClient;
use crate::external::reasoning::EtaEstimator;
use crate::external::weather::WeatherFeedClient;
use crate::services::geo::GeoIndex;
use crate::services::merge::ResultMerger;
use crate::services::payload::PayloadBuilder;

pub struct EtaPipeline {
    positions: PositionFeedClient,
    weather: WeatherFeedClient,
    estimator: Arc<dyn EtaEstimator>,
    payload: PayloadBuilder,
    merger: ResultMerger,
    fleet: HashSet<String>,
}

impl EtaPipeline {
    pub fn new(
        positions: PositionFeedClient,
        weather: WeatherFeedClient,
        estimator: Arc<dyn EtaEstimator>,
        geo: Arc<GeoIndex>,
        fleet: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            positions,
            weather,
            estimator,
            payload: PayloadBuilder::new(geo.clone()),
            merger: ResultMerger::new(geo),
            fleet: fleet.into_iter().map(|v| v.to_uppercase()).collect(),
        }
    }

    /// One full request: fetch both feeds concurrently, then enrich.
    /// Either feed failing fails the whole request; the other fetch's
    /// result is discarded.
    pub async fn run(&self) -> AppResult<FerryWeatherResponse> {
        let (positions, weather) = tokio::join!(
            self.positions.fetch_positions(),
            self.weather.fetch_current()
        );

        let vessels = positions?;
        let raw_weather = weather?;

        Ok(self.enrich(vessels, raw_weather).await)
    }

    /// The pure enrichment stage, separable from the fetches.
    ///
    /// Reasoning failure is recovered here: every tracked vessel gets the
    /// null-ETA fallback with the failure reason in its notes, and the
    /// request still succeeds.
    pub async fn enrich(
        &self,
        vessels: Vec<VesselPosition>,
        raw_weather: serde_json::Value,
    ) -> FerryWeatherResponse {
        let total = vessels.len();
        let tracked: Vec<VesselPosition> = vessels
            .into_iter()
            .filter(|v| self.fleet.contains(&v.vessel_id.to_uppercase()))
            .collect();
        tracing::debug!("Tracking {} of {} reported vessels", tracked.len(), total);

        if tracked.is_empty() {
            return FerryWeatherResponse {
                ferry_positions: Vec::new(),
                weather: raw_weather,
            };
        }

        let (items, snapshot) = self.payload.build(&tracked, &raw_weather);

        let ferry_positions = match self.estimator.estimate(&items, &snapshot).await {
            Ok(estimates) => self.merger.merge(tracked, &estimates),
            Err(err) => {
                tracing::warn!("Reasoning degraded, falling back to null ETAs: {}", err);
                self.merger
                    .fallback(tracked, &format!("ETA unavailable: {}", err))
            }
        };

        FerryWeatherResponse {
            ferry_positions,
            weather: raw_weather,
        }
    }
}
