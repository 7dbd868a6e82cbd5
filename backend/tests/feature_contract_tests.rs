//! Feature-encoding contract property and unit tests
//!
//! Comprehensive tests for:
//! - Property 1: One-Hot Indicator Exclusivity
//! - Property 2: Manifest Alignment Order
//! - Property 3: Zero-Fill of Missing Columns
//! - Property 4: Extra Columns Are Dropped

use proptest::prelude::*;

use shared::features::{
    align_to_manifest, crop_column, season_column, training_columns, FeatureManifest, FeatureRow,
};
use shared::models::{Crop, Season, SensorReading};

// ============================================================================
// Property Test Strategies
// ============================================================================

fn crop_strategy() -> impl Strategy<Value = Crop> {
    (0..Crop::ALL.len()).prop_map(|i| Crop::ALL[i])
}

fn season_strategy() -> impl Strategy<Value = Season> {
    (0..Season::ALL.len()).prop_map(|i| Season::ALL[i])
}

/// Generate readings across the full input ranges
fn reading_strategy() -> impl Strategy<Value = SensorReading> {
    (
        20.0f32..=40.0,
        30.0f32..=80.0,
        10.0f32..=60.0,
        0.0f32..=15.0,
        prop_oneof![Just(0.0f32), Just(0.5f32), Just(2.0f32)],
        crop_strategy(),
        season_strategy(),
    )
        .prop_map(
            |(temperature, humidity, soil_moisture, wind_speed, rainfall_forecast, crop, season)| {
                SensorReading {
                    temperature,
                    humidity,
                    soil_moisture,
                    wind_speed,
                    rainfall_forecast,
                    crop,
                    season,
                }
            },
        )
}

/// Generate a random permutation of the canonical training columns
fn permuted_manifest_strategy() -> impl Strategy<Value = FeatureManifest> {
    Just(training_columns())
        .prop_shuffle()
        .prop_map(FeatureManifest::new)
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Property 1: One-Hot Indicator Exclusivity
    /// For any reading, exactly one crop and one season indicator is set.
    #[test]
    fn test_one_hot_indicators_sum_to_one(reading in reading_strategy()) {
        let row = FeatureRow::encode(&reading);

        let crop_sum: f32 = Crop::ALL
            .iter()
            .map(|c| row.get(&crop_column(*c)).unwrap_or(0.0))
            .sum();
        let season_sum: f32 = Season::ALL
            .iter()
            .map(|s| row.get(&season_column(*s)).unwrap_or(0.0))
            .sum();

        prop_assert_eq!(crop_sum, 1.0, "crop indicators must sum to 1");
        prop_assert_eq!(season_sum, 1.0, "season indicators must sum to 1");
        prop_assert_eq!(row.get(&crop_column(reading.crop)), Some(1.0));
        prop_assert_eq!(row.get(&season_column(reading.season)), Some(1.0));
    }

    /// Property 2: Manifest Alignment Order
    /// The aligned vector follows the manifest's column order exactly,
    /// whatever that order is.
    #[test]
    fn test_alignment_follows_manifest_order(
        reading in reading_strategy(),
        manifest in permuted_manifest_strategy()
    ) {
        let row = FeatureRow::encode(&reading);
        let aligned = align_to_manifest(&row, &manifest);

        prop_assert_eq!(aligned.len(), manifest.len());
        for (value, column) in aligned.iter().zip(manifest.columns()) {
            prop_assert_eq!(*value, row.get(column).unwrap_or(0.0));
        }
    }

    /// Property 3: Zero-Fill of Missing Columns
    /// A manifest column the row cannot produce always reads 0.
    #[test]
    fn test_unknown_manifest_columns_are_zero(reading in reading_strategy()) {
        let mut columns = training_columns();
        columns.push("Crop_Barley".to_string());
        columns.push("Season_Monsoon".to_string());
        let manifest = FeatureManifest::new(columns);

        let aligned = align_to_manifest(&FeatureRow::encode(&reading), &manifest);
        prop_assert_eq!(aligned[aligned.len() - 2], 0.0);
        prop_assert_eq!(aligned[aligned.len() - 1], 0.0);
    }

    /// Property 4: Extra Columns Are Dropped
    /// A manifest narrower than the row bounds the output exactly.
    #[test]
    fn test_extra_row_columns_are_dropped(reading in reading_strategy()) {
        let manifest = FeatureManifest::new(vec!["Soil".to_string()]);
        let aligned = align_to_manifest(&FeatureRow::encode(&reading), &manifest);
        prop_assert_eq!(aligned.len(), 1);
        prop_assert_eq!(aligned[0], reading.soil_moisture);
    }

    /// Alignment is deterministic: encoding twice gives identical vectors.
    #[test]
    fn test_alignment_is_deterministic(
        reading in reading_strategy(),
        manifest in permuted_manifest_strategy()
    ) {
        let first = align_to_manifest(&FeatureRow::encode(&reading), &manifest);
        let second = align_to_manifest(&FeatureRow::encode(&reading), &manifest);
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

/// The documented manifest scenario: crop Rice and season Winter produce
/// exactly one indicator each, in the canonical column order.
#[test]
fn test_rice_winter_manifest_scenario() {
    let manifest = FeatureManifest::new(
        [
            "Temp",
            "Humidity",
            "Soil",
            "Wind",
            "Rainfall",
            "Crop_Wheat",
            "Crop_Corn",
            "Crop_Rice",
            "Crop_Soybean",
            "Season_Spring",
            "Season_Summer",
            "Season_Autumn",
            "Season_Winter",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
    );

    let reading = SensorReading {
        temperature: 25.0,
        humidity: 50.0,
        soil_moisture: 20.0,
        wind_speed: 5.0,
        rainfall_forecast: 0.0,
        crop: Crop::Rice,
        season: Season::Winter,
    };

    let aligned = align_to_manifest(&FeatureRow::encode(&reading), &manifest);
    assert_eq!(
        aligned,
        vec![25.0, 50.0, 20.0, 5.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]
    );
}

#[test]
fn test_manifest_survives_json_round_trip() {
    let manifest = FeatureManifest::new(training_columns());
    let json = manifest.to_json().unwrap();
    let restored = FeatureManifest::from_json(&json).unwrap();
    assert_eq!(restored, manifest);
}
