//! Prediction context: the loaded model and its feature contract
//!
//! Built once at server startup and shared immutably; every prediction
//! re-encodes the incoming reading and aligns it to the persisted manifest
//! before asking the forest for a decision.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use shared::features::{align_to_manifest, FeatureManifest, FeatureRow};
use shared::models::SensorReading;

use crate::error::{AppError, AppResult};
use crate::ml::EvaluationReport;
use crate::services::trainer::ModelArtifact;

/// The binary decision plus the share of trees that voted for it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IrrigationDecision {
    pub irrigate: bool,
    /// Fraction of trees voting to irrigate, in [0, 1]
    pub confidence: f32,
}

/// Metadata describing the model currently being served
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub trained_samples: usize,
    pub evaluation: EvaluationReport,
    pub feature_columns: Vec<String>,
}

/// Immutable model + manifest pair serving predictions
#[derive(Debug, Clone)]
pub struct PredictionContext {
    artifact: ModelArtifact,
    manifest: FeatureManifest,
}

impl PredictionContext {
    pub fn new(artifact: ModelArtifact, manifest: FeatureManifest) -> Self {
        Self { artifact, manifest }
    }

    /// Load both artifacts from disk. Called once at startup; a missing or
    /// unreadable file is fatal because the server cannot serve predictions
    /// without them.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        model_path: P,
        manifest_path: Q,
    ) -> AppResult<Self> {
        let artifact = ModelArtifact::load(model_path)?;

        let manifest_path = manifest_path.as_ref();
        let manifest_json = std::fs::read_to_string(manifest_path).map_err(|e| {
            AppError::Artifact(format!(
                "failed to read feature manifest {}: {}",
                manifest_path.display(),
                e
            ))
        })?;
        let manifest = FeatureManifest::from_json(&manifest_json).map_err(|e| {
            AppError::Artifact(format!(
                "failed to parse feature manifest {}: {}",
                manifest_path.display(),
                e
            ))
        })?;

        tracing::info!(
            model_id = %artifact.id,
            trained_at = %artifact.trained_at,
            columns = manifest.len(),
            "prediction context loaded"
        );
        Ok(Self::new(artifact, manifest))
    }

    pub fn manifest(&self) -> &FeatureManifest {
        &self.manifest
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            id: self.artifact.id,
            trained_at: self.artifact.trained_at,
            trained_samples: self.artifact.trained_samples,
            evaluation: self.artifact.evaluation,
            feature_columns: self.manifest.columns().to_vec(),
        }
    }

    /// Align the reading to the manifest and query the forest
    pub fn predict(&self, reading: &SensorReading) -> AppResult<IrrigationDecision> {
        let row = FeatureRow::encode(reading);
        let aligned = align_to_manifest(&row, &self.manifest);

        let confidence = self.artifact.forest.vote_fraction(&aligned)?;
        Ok(IrrigationDecision {
            irrigate: confidence > 0.5,
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrainerConfig;
    use crate::services::simulator::SimulatorService;
    use crate::services::trainer::TrainerService;
    use shared::models::{Crop, Season};

    fn trained_context() -> PredictionContext {
        let records = SimulatorService::with_seed(42).generate(400).unwrap();
        let trainer = TrainerService::new(TrainerConfig {
            test_size: 0.2,
            seed: 42,
            trees: 25,
            max_depth: Some(10),
        });
        let outcome = trainer.train(&records).unwrap();
        PredictionContext::new(outcome.artifact, outcome.manifest)
    }

    fn reading(soil: f32, rainfall: f32) -> SensorReading {
        SensorReading {
            temperature: 25.0,
            humidity: 50.0,
            soil_moisture: soil,
            wind_speed: 5.0,
            rainfall_forecast: rainfall,
            crop: Crop::Wheat,
            season: Season::Spring,
        }
    }

    #[test]
    fn test_dry_field_triggers_irrigation() {
        let context = trained_context();
        let decision = context.predict(&reading(15.0, 0.0)).unwrap();
        assert!(decision.irrigate);
        assert!(decision.confidence > 0.5);
    }

    #[test]
    fn test_wet_field_needs_no_irrigation() {
        let context = trained_context();
        let decision = context.predict(&reading(55.0, 2.0)).unwrap();
        assert!(!decision.irrigate);
    }

    #[test]
    fn test_prediction_is_idempotent() {
        let context = trained_context();
        let input = reading(22.0, 0.5);
        let first = context.predict(&input).unwrap();
        let second = context.predict(&input).unwrap();
        assert_eq!(first.irrigate, second.irrigate);
        assert_eq!(first.confidence, second.confidence);
    }

    #[test]
    fn test_model_info_exposes_manifest() {
        let context = trained_context();
        let info = context.model_info();
        assert_eq!(info.feature_columns, context.manifest().columns());
        assert!(info.trained_samples > 0);
    }

    #[test]
    fn test_missing_artifacts_fail_loading() {
        let result =
            PredictionContext::load("/nonexistent/model.bin", "/nonexistent/features.json");
        assert!(matches!(result, Err(AppError::Artifact(_))));
    }
}
