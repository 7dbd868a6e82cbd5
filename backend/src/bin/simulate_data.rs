//! Smart Irrigation System - Data Simulator
//!
//! Generates the synthetic labeled dataset consumed by train-model.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use irrigation_backend::{services::SimulatorService, Config};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simulate_data=info,irrigation_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::load()?;

    let simulator = match config.simulator.seed {
        Some(seed) => SimulatorService::with_seed(seed),
        None => SimulatorService::new(),
    };

    tracing::info!(samples = config.simulator.samples, "generating dataset");
    let records = simulator.generate(config.simulator.samples)?;

    let irrigate_count = records.iter().filter(|r| r.irrigate).count();
    tracing::info!(
        total = records.len(),
        irrigate = irrigate_count,
        "label distribution"
    );

    simulator.write_csv(&records, &config.artifacts.dataset_path)?;
    tracing::info!(
        path = %config.artifacts.dataset_path,
        "simulated data generated and saved"
    );

    Ok(())
}
