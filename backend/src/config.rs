//! Configuration management for the Smart Irrigation System
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with IRRIGATION_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Locations of the file artifacts shared between the binaries
    pub artifacts: ArtifactConfig,

    /// Data simulator configuration
    pub simulator: SimulatorConfig,

    /// Model training configuration
    pub trainer: TrainerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactConfig {
    /// Simulated dataset CSV, written by simulate-data, read by train-model
    pub dataset_path: String,

    /// Serialized model, written by train-model, read by the server
    pub model_path: String,

    /// Feature-column manifest JSON, written by train-model, read by the server
    pub manifest_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    /// Number of labeled records to generate
    pub samples: usize,

    /// Optional RNG seed for reproducible datasets
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrainerConfig {
    /// Held-out fraction for the evaluation split
    pub test_size: f32,

    /// Seed shared by the split shuffle and the forest bootstrap
    pub seed: u64,

    /// Number of trees in the forest
    pub trees: usize,

    /// Optional depth limit per tree
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("IRRIGATION_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("artifacts.dataset_path", "data/simulated_data.csv")?
            .set_default("artifacts.model_path", "data/irrigation_model.bin")?
            .set_default("artifacts.manifest_path", "data/model_features.json")?
            .set_default("simulator.samples", 1000)?
            .set_default("trainer.test_size", 0.2)?
            .set_default("trainer.seed", 42)?
            .set_default("trainer.trees", 100)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (IRRIGATION_ prefix)
            .add_source(
                Environment::with_prefix("IRRIGATION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
