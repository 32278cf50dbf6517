//! Speed/weather policy integration tests
//!
//! The policy is the contract shared with the reasoning service, so its
//! numbers are pinned here exactly, including the worked scenarios.

use proptest::prelude::*;

use ferry_eta_backend::services::eta_policy::{
    effective_speed_kph, eta_minutes, speed_reduction, SpeedTable, MAX_TOTAL_REDUCTION,
};
use std::collections::HashMap;

fn speed_table() -> SpeedTable {
    SpeedTable::new(
        HashMap::from([
            ("FULLERS".to_string(), 28.0),
            ("SEALINK".to_string(), 21.0),
        ]),
        20.0,
    )
}

// ============================================================================
// Unit Tests
// ============================================================================

/// Vessel at the dock, FULLERS, wind 5.4 kph, condition "Clear":
/// no reduction, eta 0.0.
#[test]
fn test_scenario_at_berth_in_calm_weather() {
    let baseline = speed_table().baseline_for("FULLERS");
    let speed = effective_speed_kph(baseline, 5.4, "Clear");
    assert_eq!(speed, 28.0);
    assert_eq!(eta_minutes(0.0, speed), 0.0);
}

/// Wind 30 kph + "Heavy rain" at 2.0 km:
/// reduction = min(0.25 + 0.10, 0.5) = 0.35, speed = 18.2, eta ≈ 6.59.
#[test]
fn test_scenario_strong_wind_and_heavy_rain() {
    let baseline = speed_table().baseline_for("FULLERS");
    let speed = effective_speed_kph(baseline, 30.0, "Heavy rain");
    assert!((speed - 18.2).abs() < 1e-9);

    let eta = eta_minutes(2.0, speed);
    assert!((eta - 6.59).abs() < 0.01, "got {}", eta);
}

#[test]
fn test_unknown_operator_falls_back_to_default() {
    assert_eq!(speed_table().baseline_for("RED BOATS"), 20.0);
}

#[test]
fn test_wind_bands_do_not_stack() {
    // 30 kph is in the strong band only: 25%, not 25% + 10%.
    assert_eq!(speed_reduction(30.0, "Sunny"), 0.25);
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn wind_strategy() -> impl Strategy<Value = f64> {
    0.0..200.0f64
}

fn baseline_strategy() -> impl Strategy<Value = f64> {
    5.0..60.0f64
}

fn condition_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "Clear",
        "Sunny",
        "Partly cloudy",
        "Overcast",
        "Mist",
        "Light rain",
        "Heavy rain",
        "Patchy drizzle",
        "Thundery outbreaks possible",
        "Moderate snow",
        "Blowing showers",
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Effective speed under combined penalties never drops below 50% of
    /// baseline, for any baseline and any wind value.
    #[test]
    fn prop_effective_speed_is_at_least_half_baseline(
        baseline in baseline_strategy(),
        wind in wind_strategy(),
        condition in condition_strategy()
    ) {
        let speed = effective_speed_kph(baseline, wind, condition);
        prop_assert!(speed >= baseline * 0.5 - 1e-9);
        prop_assert!(speed <= baseline + 1e-9);
    }

    /// Reduction is monotonic in wind speed for a fixed condition.
    #[test]
    fn prop_reduction_is_monotonic_in_wind(
        wind_low in wind_strategy(),
        wind_high in wind_strategy(),
        condition in condition_strategy()
    ) {
        let (low, high) = if wind_low <= wind_high {
            (wind_low, wind_high)
        } else {
            (wind_high, wind_low)
        };
        prop_assert!(speed_reduction(low, condition) <= speed_reduction(high, condition));
    }

    /// The cap bounds the reduction whatever the inputs.
    #[test]
    fn prop_reduction_is_capped(
        wind in wind_strategy(),
        condition in condition_strategy()
    ) {
        let reduction = speed_reduction(wind, condition);
        prop_assert!((0.0..=MAX_TOTAL_REDUCTION).contains(&reduction));
    }

    /// ETA scales linearly with distance at fixed speed.
    #[test]
    fn prop_eta_is_linear_in_distance(
        distance in 0.0..100.0f64,
        baseline in baseline_strategy(),
        wind in wind_strategy(),
        condition in condition_strategy()
    ) {
        let speed = effective_speed_kph(baseline, wind, condition);
        let one = eta_minutes(distance, speed);
        let double = eta_minutes(distance * 2.0, speed);
        prop_assert!((double - 2.0 * one).abs() < 1e-6);
    }
}
