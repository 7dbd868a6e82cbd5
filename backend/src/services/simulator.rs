//! Sensor data simulator producing the synthetic labeled dataset

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shared::features::{LABEL_COLUMN, NUMERIC_COLUMNS};
use shared::models::{Crop, LabeledRecord, Season, SensorReading};

use crate::error::{AppError, AppResult};

/// Discrete rainfall forecast levels in mm
const RAINFALL_LEVELS: [f32; 3] = [0.0, 0.5, 2.0];

/// Generates synthetic labeled sensor records
#[derive(Debug, Clone, Default)]
pub struct SimulatorService {
    seed: Option<u64>,
}

impl SimulatorService {
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Fix the RNG seed so repeated runs produce the same dataset
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Generate `samples` labeled records, each field drawn independently
    /// from its fixed distribution. The label is computed by the
    /// deterministic irrigation rule, never sampled.
    pub fn generate(&self, samples: usize) -> AppResult<Vec<LabeledRecord>> {
        if samples < 1 {
            return Err(AppError::InvalidSampleCount(samples));
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut records = Vec::with_capacity(samples);
        for _ in 0..samples {
            let reading = SensorReading {
                temperature: round1(rng.gen_range(20.0..=40.0)),
                humidity: round1(rng.gen_range(30.0..=80.0)),
                soil_moisture: round1(rng.gen_range(10.0..=60.0)),
                wind_speed: round1(rng.gen_range(0.0..=15.0)),
                rainfall_forecast: RAINFALL_LEVELS[rng.gen_range(0..RAINFALL_LEVELS.len())],
                crop: Crop::ALL[rng.gen_range(0..Crop::ALL.len())],
                season: Season::ALL[rng.gen_range(0..Season::ALL.len())],
            };
            records.push(LabeledRecord::from_reading(reading));
        }

        tracing::debug!(samples, "generated labeled records");
        Ok(records)
    }

    /// Write records to the dataset CSV with the canonical column layout:
    /// `Temp,Humidity,Soil,Wind,Rainfall,Crop,Season,Irrigation`
    pub fn write_csv<P: AsRef<Path>>(&self, records: &[LabeledRecord], path: P) -> AppResult<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path.as_ref())?;

        let mut header: Vec<&str> = NUMERIC_COLUMNS.to_vec();
        header.extend(["Crop", "Season", LABEL_COLUMN]);
        writer.write_record(&header)?;

        for record in records {
            let reading = &record.reading;
            writer.write_record(&[
                format!("{:.1}", reading.temperature),
                format!("{:.1}", reading.humidity),
                format!("{:.1}", reading.soil_moisture),
                format!("{:.1}", reading.wind_speed),
                format!("{:.1}", reading.rainfall_forecast),
                reading.crop.to_string(),
                reading.season.to_string(),
                if record.irrigate { "1" } else { "0" }.to_string(),
            ])?;
        }

        writer.flush()?;
        tracing::info!(
            records = records.len(),
            path = %path.as_ref().display(),
            "dataset written"
        );
        Ok(())
    }
}

/// Round to one decimal place, matching the sensor capture resolution
fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
