//! Smart Irrigation System - Prediction Server
//!
//! Loads the trained model and its feature manifest once at startup and
//! serves irrigation recommendations through a dashboard UI and a JSON API.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use irrigation_backend::{create_app, services::PredictionContext, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "irrigation_server=debug,irrigation_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Smart Irrigation Server");
    tracing::info!("Environment: {}", config.environment);

    // Load the model and feature manifest; without them the server cannot
    // serve predictions, so a missing artifact is fatal.
    let context = PredictionContext::load(
        &config.artifacts.model_path,
        &config.artifacts.manifest_path,
    )
    .context("run simulate-data and train-model before starting the server")?;

    // Create application state
    let state = AppState {
        predictor: Arc::new(context),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
