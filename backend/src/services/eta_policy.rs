//! The versioned speed/weather policy for ETA estimation
//!
//! The reasoning service is instructed to apply this exact policy rather
//! than invent its own; the same functions back the deterministic test
//! double, so pipeline correctness can be checked without the live service.

use std::collections::HashMap;

use crate::config::SpeedConfig;

/// Bump when the policy text sent to the reasoning service changes.
pub const POLICY_VERSION: &str = "v1";

pub const STRONG_WIND_KPH: f64 = 25.0;
pub const MODERATE_WIND_KPH: f64 = 10.0;
pub const STRONG_WIND_REDUCTION: f64 = 0.25;
pub const MODERATE_WIND_REDUCTION: f64 = 0.10;
pub const PRECIPITATION_REDUCTION: f64 = 0.10;
/// Effective speed never drops below half of baseline.
pub const MAX_TOTAL_REDUCTION: f64 = 0.50;

/// Condition-text keywords that count as precipitation or storm.
pub const PRECIPITATION_KEYWORDS: &[&str] = &[
    "rain", "drizzle", "shower", "storm", "thunder", "sleet", "snow", "hail",
];

/// Operator baseline cruising speeds, with a default for unknown operators.
#[derive(Debug, Clone)]
pub struct SpeedTable {
    baseline_kph: HashMap<String, f64>,
    default_kph: f64,
}

impl SpeedTable {
    pub fn new(baseline_kph: HashMap<String, f64>, default_kph: f64) -> Self {
        Self {
            baseline_kph,
            default_kph,
        }
    }

    pub fn baseline_for(&self, operator: &str) -> f64 {
        self.baseline_kph
            .get(operator)
            .copied()
            .unwrap_or(self.default_kph)
    }

    pub fn baselines(&self) -> &HashMap<String, f64> {
        &self.baseline_kph
    }

    pub fn default_kph(&self) -> f64 {
        self.default_kph
    }
}

impl From<&SpeedConfig> for SpeedTable {
    fn from(config: &SpeedConfig) -> Self {
        Self::new(config.baseline_kph.clone(), config.default_kph)
    }
}

/// Whether the condition text names precipitation or a storm.
pub fn condition_has_precipitation(condition_text: &str) -> bool {
    let lowered = condition_text.to_lowercase();
    PRECIPITATION_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Cumulative speed reduction for the given weather, capped so the
/// effective speed never drops below half of baseline.
///
/// The wind bands are mutually exclusive, not additive.
pub fn speed_reduction(wind_speed_kph: f64, condition_text: &str) -> f64 {
    let wind = if wind_speed_kph >= STRONG_WIND_KPH {
        STRONG_WIND_REDUCTION
    } else if wind_speed_kph >= MODERATE_WIND_KPH {
        MODERATE_WIND_REDUCTION
    } else {
        0.0
    };

    let precipitation = if condition_has_precipitation(condition_text) {
        PRECIPITATION_REDUCTION
    } else {
        0.0
    };

    (wind + precipitation).min(MAX_TOTAL_REDUCTION)
}

/// Baseline speed with the weather reduction applied.
pub fn effective_speed_kph(baseline_kph: f64, wind_speed_kph: f64, condition_text: &str) -> f64 {
    baseline_kph * (1.0 - speed_reduction(wind_speed_kph, condition_text))
}

/// ETA in minutes at the given effective speed.
pub fn eta_minutes(distance_km: f64, effective_speed_kph: f64) -> f64 {
    distance_km / effective_speed_kph * 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_bands_are_mutually_exclusive() {
        assert_eq!(speed_reduction(5.4, "Clear"), 0.0);
        assert_eq!(speed_reduction(10.0, "Clear"), 0.10);
        assert_eq!(speed_reduction(24.9, "Clear"), 0.10);
        assert_eq!(speed_reduction(25.0, "Clear"), 0.25);
        assert_eq!(speed_reduction(60.0, "Clear"), 0.25);
    }

    #[test]
    fn test_precipitation_keyword_adds_ten_percent() {
        assert_eq!(speed_reduction(0.0, "Light rain"), 0.10);
        assert_eq!(speed_reduction(12.0, "Patchy drizzle"), 0.20);
        assert_eq!(speed_reduction(30.0, "Heavy rain"), 0.35);
        assert_eq!(speed_reduction(30.0, "Thundery outbreaks"), 0.35);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert!(condition_has_precipitation("RAIN"));
        assert!(condition_has_precipitation("Moderate Snow"));
        assert!(!condition_has_precipitation("Sunny"));
        assert!(!condition_has_precipitation("Overcast"));
    }

    #[test]
    fn test_unknown_operator_uses_default_baseline() {
        let table = SpeedTable::new(HashMap::from([("FULLERS".to_string(), 28.0)]), 20.0);
        assert_eq!(table.baseline_for("FULLERS"), 28.0);
        assert_eq!(table.baseline_for("UNKNOWN OPERATOR"), 20.0);
    }

    #[test]
    fn test_scenario_calm_weather_zero_distance() {
        // Vessel at the dock, FULLERS baseline 28 km/h, wind 5.4 kph, Clear.
        let speed = effective_speed_kph(28.0, 5.4, "Clear");
        assert_eq!(speed, 28.0);
        assert_eq!(eta_minutes(0.0, speed), 0.0);
    }

    #[test]
    fn test_scenario_strong_wind_heavy_rain() {
        // reduction = min(0.25 + 0.10, 0.5) = 0.35
        // effective = 28 * 0.65 = 18.2 km/h, eta = 2.0 / 18.2 * 60 ≈ 6.59
        let speed = effective_speed_kph(28.0, 30.0, "Heavy rain");
        assert!((speed - 18.2).abs() < 1e-9);
        let eta = eta_minutes(2.0, speed);
        assert!((eta - 6.593406593406593).abs() < 1e-9);
    }

    #[test]
    fn test_reduction_is_capped_at_half_baseline() {
        // Even with every penalty applied, 0.25 + 0.10 < 0.50 under this
        // table; the cap still bounds any future penalty combination.
        let reduction = speed_reduction(f64::MAX, "thunderstorm with hail and rain");
        assert!(reduction <= MAX_TOTAL_REDUCTION);
        assert!(effective_speed_kph(28.0, f64::MAX, "rain") >= 14.0);
    }
}
