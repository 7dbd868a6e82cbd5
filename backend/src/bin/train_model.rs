//! Smart Irrigation System - Model Trainer
//!
//! Reads the simulated dataset, fits the random forest, reports held-out
//! metrics, and persists the model artifact plus the feature manifest.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use irrigation_backend::{services::TrainerService, Config};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "train_model=info,irrigation_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::load()?;

    let trainer = TrainerService::new(config.trainer.clone());

    let records = trainer.load_dataset(&config.artifacts.dataset_path)?;
    let outcome = trainer.train(&records)?;

    let evaluation = &outcome.artifact.evaluation;
    tracing::info!(
        model_id = %outcome.artifact.id,
        accuracy = evaluation.accuracy,
        precision = evaluation.precision,
        recall = evaluation.recall,
        f1 = evaluation.f1,
        "training complete"
    );

    trainer.persist(
        &outcome,
        &config.artifacts.model_path,
        &config.artifacts.manifest_path,
    )?;
    tracing::info!("model and feature list saved");

    Ok(())
}
