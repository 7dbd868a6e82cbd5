//! Route definitions for the Smart Irrigation System

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Prediction endpoint backing the dashboard
        .route("/predict", post(handlers::predict))
        // Metadata about the served model
        .route("/model", get(handlers::model_info))
}
