//! Smart Irrigation System - backend library
//!
//! Hosts the three cooperating binaries: the data simulator, the model
//! trainer, and the prediction server. They compose only through file
//! artifacts (dataset CSV, model binary, feature manifest).

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod ml;
pub mod routes;
pub mod services;

pub use config::Config;

use services::PredictionContext;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<PredictionContext>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
