//! Weather observation models

use serde::{Deserialize, Serialize};

/// Single-location current conditions, projected down from the raw
/// upstream weather object.
///
/// Unrecognized upstream fields are dropped; missing upstream fields become
/// `None`, never an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub condition_text: String,
    pub wind_speed_kph: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gust_speed_kph: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_daytime: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_km: Option<f64>,
}

impl WeatherSnapshot {
    /// Project the raw weather feed object (`{"location": .., "current": ..}`)
    /// down to the fields the reasoning payload carries.
    pub fn from_feed(raw: &serde_json::Value) -> Self {
        let current = &raw["current"];

        Self {
            condition_text: current["condition"]["text"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            wind_speed_kph: current["wind_kph"].as_f64().unwrap_or(0.0),
            gust_speed_kph: current["gust_kph"].as_f64(),
            precipitation_mm: current["precip_mm"].as_f64(),
            humidity: current["humidity"].as_i64().map(|h| h as i32),
            temperature_c: current["temp_c"].as_f64(),
            // The feed publishes is_day as 0/1.
            is_daytime: current["is_day"].as_i64().map(|d| d == 1),
            visibility_km: current["vis_km"].as_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection_from_full_feed_object() {
        let raw = json!({
            "location": {"name": "Auckland", "country": "New Zealand"},
            "current": {
                "condition": {"text": "Partly cloudy", "code": 1003},
                "wind_kph": 13.0,
                "gust_kph": 18.4,
                "precip_mm": 0.1,
                "humidity": 71,
                "temp_c": 16.0,
                "is_day": 1,
                "vis_km": 10.0,
                "uv": 4.0
            }
        });

        let snapshot = WeatherSnapshot::from_feed(&raw);
        assert_eq!(snapshot.condition_text, "Partly cloudy");
        assert_eq!(snapshot.wind_speed_kph, 13.0);
        assert_eq!(snapshot.gust_speed_kph, Some(18.4));
        assert_eq!(snapshot.humidity, Some(71));
        assert_eq!(snapshot.is_daytime, Some(true));
    }

    #[test]
    fn test_projection_tolerates_missing_fields() {
        let raw = json!({
            "current": {
                "condition": {"text": "Clear"},
                "wind_kph": 5.4
            }
        });

        let snapshot = WeatherSnapshot::from_feed(&raw);
        assert_eq!(snapshot.condition_text, "Clear");
        assert_eq!(snapshot.wind_speed_kph, 5.4);
        assert_eq!(snapshot.gust_speed_kph, None);
        assert_eq!(snapshot.precipitation_mm, None);
        assert_eq!(snapshot.temperature_c, None);
    }

    #[test]
    fn test_projection_of_empty_object_is_not_an_error() {
        let snapshot = WeatherSnapshot::from_feed(&json!({}));
        assert_eq!(snapshot.condition_text, "");
        assert_eq!(snapshot.wind_speed_kph, 0.0);
        assert_eq!(snapshot.humidity, None);
    }
}
