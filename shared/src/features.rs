//! Feature encoding contract between training and inference
//!
//! The trainer persists the exact ordered list of encoded column names it was
//! fit on (the feature manifest). Inference rebuilds a row with the same
//! names and then aligns it to the manifest: missing columns are zero-filled,
//! unexpected columns are dropped. A mismatch here does not fail loudly; it
//! silently degrades predictions. The alignment therefore lives in one pure,
//! independently tested function.

use serde::{Deserialize, Serialize};

use crate::models::{Crop, Season, SensorReading};

/// Numeric feature columns, in dataset order
pub const NUMERIC_COLUMNS: [&str; 5] = ["Temp", "Humidity", "Soil", "Wind", "Rainfall"];

/// Label column of the simulated dataset
pub const LABEL_COLUMN: &str = "Irrigation";

/// One-hot column name for a crop, e.g. `Crop_Wheat`
pub fn crop_column(crop: Crop) -> String {
    format!("Crop_{}", crop.as_str())
}

/// One-hot column name for a season, e.g. `Season_Spring`
pub fn season_column(season: Season) -> String {
    format!("Season_{}", season.as_str())
}

/// The canonical encoded column order produced at training time:
/// the five numeric columns, then crop indicators, then season indicators.
pub fn training_columns() -> Vec<String> {
    let mut columns: Vec<String> = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();
    columns.extend(Crop::ALL.iter().map(|c| crop_column(*c)));
    columns.extend(Season::ALL.iter().map(|s| season_column(*s)));
    columns
}

/// A single encoded observation: named numeric columns in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pairs: Vec<(String, f32)>,
}

impl FeatureRow {
    /// Expand a sensor reading into named columns: the five numeric fields
    /// under their training-time names, plus one indicator per known crop and
    /// season value, exactly one of each set to 1.
    pub fn encode(reading: &SensorReading) -> Self {
        let mut pairs = Vec::with_capacity(NUMERIC_COLUMNS.len() + Crop::ALL.len() + Season::ALL.len());
        pairs.push(("Temp".to_string(), reading.temperature));
        pairs.push(("Humidity".to_string(), reading.humidity));
        pairs.push(("Soil".to_string(), reading.soil_moisture));
        pairs.push(("Wind".to_string(), reading.wind_speed));
        pairs.push(("Rainfall".to_string(), reading.rainfall_forecast));

        for crop in Crop::ALL {
            let indicator = if crop == reading.crop { 1.0 } else { 0.0 };
            pairs.push((crop_column(crop), indicator));
        }
        for season in Season::ALL {
            let indicator = if season == reading.season { 1.0 } else { 0.0 };
            pairs.push((season_column(season), indicator));
        }

        Self { pairs }
    }

    /// Value of a named column, if present
    pub fn get(&self, column: &str) -> Option<f32> {
        self.pairs
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| *value)
    }

    /// Column names in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(name, _)| name.as_str())
    }

    /// All (column, value) pairs in insertion order
    pub fn pairs(&self) -> &[(String, f32)] {
        &self.pairs
    }
}

/// The canonical ordered column list a model was trained on.
///
/// Persisted as a plain JSON array of strings; this is the binding contract
/// consumed at inference time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureManifest {
    columns: Vec<String>,
}

impl FeatureManifest {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Serialize to the on-disk JSON array form
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.columns)
    }

    /// Parse from the on-disk JSON array form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self {
            columns: serde_json::from_str(json)?,
        })
    }
}

/// Realign an encoded row to the manifest's column set and order.
///
/// Every manifest column missing from the row is filled with 0, and row
/// columns absent from the manifest are dropped. A category value the model
/// never saw therefore contributes nothing rather than raising an error; the
/// prediction degrades silently.
pub fn align_to_manifest(row: &FeatureRow, manifest: &FeatureManifest) -> Vec<f32> {
    manifest
        .columns()
        .iter()
        .map(|column| row.get(column).unwrap_or(0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reading() -> SensorReading {
        SensorReading {
            temperature: 25.0,
            humidity: 50.0,
            soil_moisture: 20.0,
            wind_speed: 5.0,
            rainfall_forecast: 0.0,
            crop: Crop::Rice,
            season: Season::Winter,
        }
    }

    #[test]
    fn test_exactly_one_crop_indicator() {
        let row = FeatureRow::encode(&sample_reading());
        let sum: f32 = Crop::ALL
            .iter()
            .map(|c| row.get(&crop_column(*c)).unwrap())
            .sum();
        assert_eq!(sum, 1.0);
        assert_eq!(row.get("Crop_Rice"), Some(1.0));
    }

    #[test]
    fn test_exactly_one_season_indicator() {
        let row = FeatureRow::encode(&sample_reading());
        let sum: f32 = Season::ALL
            .iter()
            .map(|s| row.get(&season_column(*s)).unwrap())
            .sum();
        assert_eq!(sum, 1.0);
        assert_eq!(row.get("Season_Winter"), Some(1.0));
    }

    #[test]
    fn test_training_columns_order() {
        let columns = training_columns();
        assert_eq!(
            columns,
            vec![
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
        );
    }

    #[test]
    fn test_alignment_matches_manifest_order() {
        let manifest = FeatureManifest::new(training_columns());
        let row = FeatureRow::encode(&sample_reading());
        let aligned = align_to_manifest(&row, &manifest);

        assert_eq!(aligned.len(), manifest.len());
        // [Temp, Humidity, Soil, Wind, Rainfall,
        //  Crop_Wheat, Crop_Corn, Crop_Rice, Crop_Soybean,
        //  Season_Spring, Season_Summer, Season_Autumn, Season_Winter]
        assert_eq!(
            aligned,
            vec![25.0, 50.0, 20.0, 5.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_alignment_zero_fills_missing_columns() {
        let mut columns = training_columns();
        columns.push("Crop_Barley".to_string());
        let manifest = FeatureManifest::new(columns);

        let aligned = align_to_manifest(&FeatureRow::encode(&sample_reading()), &manifest);
        assert_eq!(aligned.len(), 14);
        assert_eq!(*aligned.last().unwrap(), 0.0);
    }

    #[test]
    fn test_alignment_drops_extra_columns() {
        // Manifest narrower than the encoded row: extras must not leak through.
        let manifest = FeatureManifest::new(vec!["Soil".to_string(), "Rainfall".to_string()]);
        let aligned = align_to_manifest(&FeatureRow::encode(&sample_reading()), &manifest);
        assert_eq!(aligned, vec![20.0, 0.0]);
    }

    #[test]
    fn test_alignment_respects_permuted_manifest() {
        let manifest = FeatureManifest::new(vec![
            "Rainfall".to_string(),
            "Temp".to_string(),
            "Crop_Rice".to_string(),
        ]);
        let aligned = align_to_manifest(&FeatureRow::encode(&sample_reading()), &manifest);
        assert_eq!(aligned, vec![0.0, 25.0, 1.0]);
    }

    #[test]
    fn test_manifest_json_round_trip() {
        let manifest = FeatureManifest::new(training_columns());
        let json = manifest.to_json().unwrap();
        assert!(json.starts_with("[\"Temp\""));
        assert_eq!(FeatureManifest::from_json(&json).unwrap(), manifest);
    }
}
