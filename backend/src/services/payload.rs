//! Reasoning request payload builder
//!
//! Shapes the filtered fleet plus the raw weather object into the items and
//! weather summary sent to the reasoning service. Only vessel identity,
//! operator, and timestamp are carried; every other raw feed field is
//! dropped here and restored later by the merger, which keeps the request
//! payload minimal.

use std::sync::Arc;

use shared::{ReasoningRequestItem, VesselPosition, WeatherSnapshot};

use crate::services::geo::GeoIndex;

/// Round to 3 decimal places, the precision of `distance_km` on the wire.
pub fn round_distance_km(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    geo: Arc<GeoIndex>,
}

impl PayloadBuilder {
    pub fn new(geo: Arc<GeoIndex>) -> Self {
        Self { geo }
    }

    /// One request item per vessel, plus the projected weather summary.
    pub fn build(
        &self,
        vessels: &[VesselPosition],
        raw_weather: &serde_json::Value,
    ) -> (Vec<ReasoningRequestItem>, WeatherSnapshot) {
        let items = vessels
            .iter()
            .map(|vessel| {
                let nearest = self.geo.nearest(vessel.latitude, vessel.longitude);
                ReasoningRequestItem {
                    vessel_id: vessel.vessel_id.clone(),
                    operator: vessel.operator.clone(),
                    observed_at: vessel.observed_at,
                    nearest_dock: nearest.name,
                    distance_km: round_distance_km(nearest.distance_km),
                }
            })
            .collect();

        (items, WeatherSnapshot::from_feed(raw_weather))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::DockLocation;

    fn builder() -> PayloadBuilder {
        let geo = GeoIndex::new(vec![
            DockLocation::new("Downtown Ferry Terminal", -36.8429, 174.7668),
            DockLocation::new("Devonport Wharf", -36.8382, 174.7953),
        ])
        .unwrap();
        PayloadBuilder::new(Arc::new(geo))
    }

    fn vessel(id: &str, lat: f64, lng: f64) -> VesselPosition {
        serde_json::from_value(json!({
            "vessel": id,
            "operator": "FULLERS",
            "lat": lat,
            "lng": lng,
            "timestamp": "2024-06-01T08:30:00Z",
            "callsign": "ZMKE"
        }))
        .unwrap()
    }

    #[test]
    fn test_one_item_per_vessel_with_nearest_dock() {
        let vessels = vec![
            vessel("KEA", -36.8429, 174.7668),
            vessel("KORORA", -36.8385, 174.7950),
        ];
        let (items, _) = builder().build(&vessels, &json!({}));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].nearest_dock, "Downtown Ferry Terminal");
        assert_eq!(items[0].distance_km, 0.0);
        assert_eq!(items[1].nearest_dock, "Devonport Wharf");
    }

    #[test]
    fn test_distance_is_rounded_to_three_decimals() {
        let vessels = vec![vessel("KEA", -36.8500, 174.7700)];
        let (items, _) = builder().build(&vessels, &json!({}));

        let distance = items[0].distance_km;
        assert_eq!(distance, round_distance_km(distance));
        // 3 decimal places exactly
        assert_eq!((distance * 1000.0).fract(), 0.0);
    }

    #[test]
    fn test_pass_through_fields_are_not_carried() {
        let vessels = vec![vessel("KEA", -36.8429, 174.7668)];
        let (items, _) = builder().build(&vessels, &json!({}));

        let wire = serde_json::to_value(&items[0]).unwrap();
        assert!(wire.get("callsign").is_none());
        assert_eq!(wire["vessel_id"], "KEA");
    }

    #[test]
    fn test_weather_summary_is_projected() {
        let raw = json!({
            "current": {"condition": {"text": "Light rain"}, "wind_kph": 17.0}
        });
        let (_, weather) = builder().build(&[], &raw);
        assert_eq!(weather.condition_text, "Light rain");
        assert_eq!(weather.wind_speed_kph, 17.0);
    }
}
