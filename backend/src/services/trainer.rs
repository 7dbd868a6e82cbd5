//! Model training: dataset ingest, encoding, fitting, evaluation, persistence

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::features::{
    align_to_manifest, training_columns, FeatureManifest, FeatureRow, LABEL_COLUMN,
};
use shared::models::{Crop, LabeledRecord, Season, SensorReading};

use crate::config::TrainerConfig;
use crate::error::{AppError, AppResult};
use crate::ml::{train_test_split, EvaluationReport, Matrix, RandomForest};

/// A trained classifier plus the metadata recorded at training time.
///
/// Immutable once persisted; consumed only through the forest's predict
/// interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub trained_samples: usize,
    pub evaluation: EvaluationReport,
    pub forest: RandomForest,
}

impl ModelArtifact {
    /// Serialize to the opaque binary artifact file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = bincode::serialize(self)
            .map_err(|e| AppError::Artifact(format!("failed to encode model: {}", e)))?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a previously persisted artifact
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            AppError::Artifact(format!("failed to read model file {}: {}", path.display(), e))
        })?;
        bincode::deserialize(&bytes).map_err(|e| {
            AppError::Artifact(format!("failed to decode model file {}: {}", path.display(), e))
        })
    }
}

/// Everything the trainer produces: the artifact and its feature contract
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub artifact: ModelArtifact,
    pub manifest: FeatureManifest,
}

/// Trains the irrigation classifier from the simulated dataset
#[derive(Debug, Clone)]
pub struct TrainerService {
    config: TrainerConfig,
}

impl TrainerService {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Read the dataset CSV, rejecting files without the label column and
    /// surfacing row-level parse failures with their line number.
    pub fn load_dataset<P: AsRef<Path>>(&self, path: P) -> AppResult<Vec<LabeledRecord>> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;

        let headers = reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h == name);

        let label_idx = column(LABEL_COLUMN).ok_or(AppError::MissingLabelColumn(LABEL_COLUMN))?;
        let required = ["Temp", "Humidity", "Soil", "Wind", "Rainfall", "Crop", "Season"];
        let mut indices = [0usize; 7];
        for (slot, name) in indices.iter_mut().zip(required) {
            *slot = column(name)
                .ok_or_else(|| AppError::Dataset(format!("missing '{}' column", name)))?;
        }
        let [temp_idx, humidity_idx, soil_idx, wind_idx, rainfall_idx, crop_idx, season_idx] =
            indices;

        fn field(row: &csv::StringRecord, idx: usize, line: usize) -> AppResult<&str> {
            row.get(idx)
                .ok_or_else(|| AppError::Dataset(format!("line {}: truncated row", line)))
        }
        fn numeric(row: &csv::StringRecord, idx: usize, line: usize) -> AppResult<f32> {
            let raw = field(row, idx, line)?;
            raw.parse::<f32>()
                .map_err(|_| AppError::Dataset(format!("line {}: invalid number '{}'", line, raw)))
        }

        let mut records = Vec::new();
        for (row_number, row) in reader.records().enumerate() {
            let row = row?;
            let line = row_number + 2; // 1-based, after the header

            let reading = SensorReading {
                temperature: numeric(&row, temp_idx, line)?,
                humidity: numeric(&row, humidity_idx, line)?,
                soil_moisture: numeric(&row, soil_idx, line)?,
                wind_speed: numeric(&row, wind_idx, line)?,
                rainfall_forecast: numeric(&row, rainfall_idx, line)?,
                crop: Crop::from_str(field(&row, crop_idx, line)?)
                    .map_err(|e| AppError::Dataset(format!("line {}: {}", line, e)))?,
                season: Season::from_str(field(&row, season_idx, line)?)
                    .map_err(|e| AppError::Dataset(format!("line {}: {}", line, e)))?,
            };

            let irrigate = match field(&row, label_idx, line)? {
                "1" | "true" => true,
                "0" | "false" => false,
                other => {
                    return Err(AppError::Dataset(format!(
                        "line {}: invalid label '{}'",
                        line, other
                    )))
                }
            };

            records.push(LabeledRecord { reading, irrigate });
        }

        tracing::info!(
            records = records.len(),
            path = %path.as_ref().display(),
            "dataset loaded"
        );
        Ok(records)
    }

    /// One-hot encode the records, hold out a seeded evaluation split, fit
    /// the forest, and report held-out metrics. The returned manifest is the
    /// exact encoded column order the forest was fit on.
    pub fn train(&self, records: &[LabeledRecord]) -> AppResult<TrainingOutcome> {
        if records.is_empty() {
            return Err(AppError::EmptyTrainingSet);
        }

        let manifest = FeatureManifest::new(training_columns());
        let rows: Vec<Vec<f32>> = records
            .iter()
            .map(|record| align_to_manifest(&FeatureRow::encode(&record.reading), &manifest))
            .collect();
        let labels: Vec<bool> = records.iter().map(|record| record.irrigate).collect();

        let x = Matrix::from_rows(&rows)?;
        let (x_train, x_test, y_train, y_test) = train_test_split(
            &x,
            &labels,
            self.config.test_size,
            Some(self.config.seed),
        )?;

        let mut forest = RandomForest::new(self.config.trees).with_seed(self.config.seed);
        if let Some(depth) = self.config.max_depth {
            forest = forest.with_max_depth(depth);
        }
        forest.fit(&x_train, &y_train)?;

        let predictions = forest.predict(&x_test)?;
        let evaluation = EvaluationReport::evaluate(&predictions, &y_test);
        tracing::info!(
            accuracy = evaluation.accuracy,
            precision = evaluation.precision,
            recall = evaluation.recall,
            f1 = evaluation.f1,
            support = evaluation.support,
            "held-out evaluation"
        );

        let artifact = ModelArtifact {
            id: Uuid::new_v4(),
            trained_at: Utc::now(),
            trained_samples: x_train.n_rows(),
            evaluation,
            forest,
        };

        Ok(TrainingOutcome { artifact, manifest })
    }

    /// Persist the model artifact and the feature-column manifest
    pub fn persist<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        outcome: &TrainingOutcome,
        model_path: P,
        manifest_path: Q,
    ) -> AppResult<()> {
        outcome.artifact.save(model_path.as_ref())?;

        let manifest_path = manifest_path.as_ref();
        if let Some(parent) = manifest_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(manifest_path, outcome.manifest.to_json()?)?;

        tracing::info!(
            model = %model_path.as_ref().display(),
            manifest = %manifest_path.display(),
            "model and feature manifest saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::simulator::SimulatorService;

    fn test_config() -> TrainerConfig {
        TrainerConfig {
            test_size: 0.2,
            seed: 42,
            trees: 20,
            max_depth: Some(10),
        }
    }

    #[test]
    fn test_train_rejects_empty_input() {
        let trainer = TrainerService::new(test_config());
        assert!(matches!(
            trainer.train(&[]),
            Err(AppError::EmptyTrainingSet)
        ));
    }

    #[test]
    fn test_training_learns_the_rule() {
        let records = SimulatorService::with_seed(42).generate(600).unwrap();
        let trainer = TrainerService::new(test_config());
        let outcome = trainer.train(&records).unwrap();

        // The label is a simple threshold rule; a forest should nail it.
        assert!(outcome.artifact.evaluation.accuracy > 0.9);
        assert_eq!(outcome.manifest.columns(), training_columns().as_slice());
    }

    #[test]
    fn test_artifact_round_trip() {
        let records = SimulatorService::with_seed(5).generate(120).unwrap();
        let trainer = TrainerService::new(test_config());
        let outcome = trainer.train(&records).unwrap();

        let dir = std::env::temp_dir().join("irrigation-trainer-test");
        let model_path = dir.join("model.bin");
        let manifest_path = dir.join("features.json");
        trainer
            .persist(&outcome, &model_path, &manifest_path)
            .unwrap();

        let loaded = ModelArtifact::load(&model_path).unwrap();
        assert_eq!(loaded.id, outcome.artifact.id);
        assert_eq!(loaded.trained_samples, outcome.artifact.trained_samples);

        let manifest_json = std::fs::read_to_string(&manifest_path).unwrap();
        let loaded_manifest = FeatureManifest::from_json(&manifest_json).unwrap();
        assert_eq!(loaded_manifest, outcome.manifest);

        std::fs::remove_file(&model_path).ok();
        std::fs::remove_file(&manifest_path).ok();
    }

    #[test]
    fn test_load_dataset_missing_label_column() {
        let dir = std::env::temp_dir().join("irrigation-trainer-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("no_label.csv");
        std::fs::write(&path, "Temp,Humidity,Soil,Wind,Rainfall,Crop,Season\n25.0,50.0,20.0,5.0,0.0,Wheat,Spring\n").unwrap();

        let trainer = TrainerService::new(test_config());
        assert!(matches!(
            trainer.load_dataset(&path),
            Err(AppError::MissingLabelColumn("Irrigation"))
        ));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_dataset_reports_bad_rows() {
        let dir = std::env::temp_dir().join("irrigation-trainer-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad_row.csv");
        std::fs::write(
            &path,
            "Temp,Humidity,Soil,Wind,Rainfall,Crop,Season,Irrigation\n25.0,50.0,not-a-number,5.0,0.0,Wheat,Spring,1\n",
        )
        .unwrap();

        let trainer = TrainerService::new(test_config());
        match trainer.load_dataset(&path) {
            Err(AppError::Dataset(message)) => assert!(message.contains("line 2")),
            other => panic!("expected dataset error, got {:?}", other),
        }

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_dataset_round_trip_through_csv() {
        let dir = std::env::temp_dir().join("irrigation-trainer-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("round_trip.csv");

        let simulator = SimulatorService::with_seed(9);
        let records = simulator.generate(40).unwrap();
        simulator.write_csv(&records, &path).unwrap();

        let trainer = TrainerService::new(test_config());
        let loaded = trainer.load_dataset(&path).unwrap();
        assert_eq!(loaded.len(), records.len());
        for (loaded, original) in loaded.iter().zip(records.iter()) {
            assert_eq!(loaded.irrigate, original.irrigate);
            assert_eq!(loaded.reading.crop, original.reading.crop);
            assert_eq!(loaded.reading.season, original.reading.season);
            assert!((loaded.reading.soil_moisture - original.reading.soil_moisture).abs() < 0.05);
        }

        std::fs::remove_file(&path).ok();
    }
}
