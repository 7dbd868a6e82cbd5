//! Sensor domain model for the Smart Irrigation System

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Crop types supported by the system
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Crop {
    Wheat,
    Corn,
    Rice,
    Soybean,
}

impl Crop {
    /// All crops, in the canonical order used for one-hot columns
    pub const ALL: [Crop; 4] = [Crop::Wheat, Crop::Corn, Crop::Rice, Crop::Soybean];

    /// Stable name used in CSV cells and one-hot column names
    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Wheat => "Wheat",
            Crop::Corn => "Corn",
            Crop::Rice => "Rice",
            Crop::Soybean => "Soybean",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Crop {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Crop::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownCategory {
                kind: "crop",
                value: s.to_string(),
            })
    }
}

/// Seasons supported by the system
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// All seasons, in the canonical order used for one-hot columns
    pub const ALL: [Season; 4] = [
        Season::Spring,
        Season::Summer,
        Season::Autumn,
        Season::Winter,
    ];

    /// Stable name used in CSV cells and one-hot column names
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownCategory {
                kind: "season",
                value: s.to_string(),
            })
    }
}

/// Error returned when a categorical CSV cell or API value is not recognized
#[derive(Debug, Clone, Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownCategory {
    pub kind: &'static str,
    pub value: String,
}

/// A snapshot of field conditions, immutable once captured
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorReading {
    /// Air temperature in °C
    pub temperature: f32,
    /// Relative humidity in %
    pub humidity: f32,
    /// Soil moisture in %
    pub soil_moisture: f32,
    /// Wind speed in km/h
    pub wind_speed: f32,
    /// Forecast rainfall in mm
    pub rainfall_forecast: f32,
    pub crop: Crop,
    pub season: Season,
}

/// A sensor reading paired with its ground-truth irrigation label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LabeledRecord {
    pub reading: SensorReading,
    pub irrigate: bool,
}

impl LabeledRecord {
    /// Label a reading with the deterministic irrigation rule
    pub fn from_reading(reading: SensorReading) -> Self {
        Self {
            irrigate: needs_irrigation(reading.soil_moisture, reading.rainfall_forecast),
            reading,
        }
    }
}

/// The deterministic rule that produces the synthetic ground truth:
/// irrigate when the soil is dry and no meaningful rain is forecast.
pub fn needs_irrigation(soil_moisture: f32, rainfall_forecast: f32) -> bool {
    soil_moisture < 30.0 && rainfall_forecast < 1.0
}
