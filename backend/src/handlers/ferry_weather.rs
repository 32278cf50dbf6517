//! HTTP handler for the vessel ETA report endpoint

use axum::{extract::State, Json};
use shared::FerryWeatherResponse;

use crate::error::AppResult;
use crate::AppState;

/// `GET /ferry_weather` returns the enriched vessel list plus current weather.
///
/// Degraded reasoning still returns 200 with null ETAs; only upstream feed
/// failures fail the request.
pub async fn get_ferry_weather(
    State(state): State<AppState>,
) -> AppResult<Json<FerryWeatherResponse>> {
    let report = state.pipeline.run().await?;
    Ok(Json(report))
}
