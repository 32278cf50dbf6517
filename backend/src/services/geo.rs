//! Nearest-dock geo index
//!
//! Exhaustive haversine scan over the fixed dock registry. The registry is
//! small (single-digit to low tens of entries), so O(docks) per lookup is
//! fine for per-request fleets and no caching is needed.

use shared::DockLocation;

use crate::error::{AppError, AppResult};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points via the haversine formula.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// The nearest registered dock for a point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestDock {
    pub name: String,
    pub distance_km: f64,
}

/// Static registry of named dock locations, built once at startup.
#[derive(Debug, Clone)]
pub struct GeoIndex {
    docks: Vec<DockLocation>,
}

impl GeoIndex {
    /// Build the index. An empty registry is a startup configuration error,
    /// never a runtime failure of a lookup.
    pub fn new(docks: Vec<DockLocation>) -> AppResult<Self> {
        if docks.is_empty() {
            return Err(AppError::Configuration(
                "dock registry must contain at least one dock".to_string(),
            ));
        }
        Ok(Self { docks })
    }

    /// The closest registered dock to the point. Ties go to the first dock
    /// in registry iteration order, which keeps the result deterministic.
    pub fn nearest(&self, latitude: f64, longitude: f64) -> NearestDock {
        let mut best = &self.docks[0];
        let mut best_distance = haversine_km(latitude, longitude, best.latitude, best.longitude);

        for dock in &self.docks[1..] {
            let distance = haversine_km(latitude, longitude, dock.latitude, dock.longitude);
            if distance < best_distance {
                best = dock;
                best_distance = distance;
            }
        }

        NearestDock {
            name: best.name.clone(),
            distance_km: best_distance,
        }
    }

    pub fn docks(&self) -> &[DockLocation] {
        &self.docks
    }
}
