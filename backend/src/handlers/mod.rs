//! HTTP handlers for the Smart Irrigation System

use axum::{extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::models::{Crop, Season, SensorReading};

use crate::error::AppResult;
use crate::services::predictor::ModelInfo;
use crate::AppState;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// The dashboard page, embedded at compile time
pub async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../../assets/dashboard.html"))
}

/// Prediction request carrying the seven sensor fields
#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(range(min = 20.0, max = 40.0, message = "Temperature must be between 20 and 40 °C"))]
    pub temperature: f32,

    #[validate(range(min = 30.0, max = 80.0, message = "Humidity must be between 30 and 80 %"))]
    pub humidity: f32,

    #[validate(range(min = 10.0, max = 60.0, message = "Soil moisture must be between 10 and 60 %"))]
    pub soil_moisture: f32,

    #[validate(range(min = 0.0, max = 15.0, message = "Wind speed must be between 0 and 15 km/h"))]
    pub wind_speed: f32,

    #[validate(range(min = 0.0, max = 500.0, message = "Rainfall forecast must be between 0 and 500 mm"))]
    pub rainfall_forecast: f32,

    pub crop: Crop,
    pub season: Season,
}

impl PredictRequest {
    fn into_reading(self) -> SensorReading {
        SensorReading {
            temperature: self.temperature,
            humidity: self.humidity,
            soil_moisture: self.soil_moisture,
            wind_speed: self.wind_speed,
            rainfall_forecast: self.rainfall_forecast,
            crop: self.crop,
            season: self.season,
        }
    }
}

/// Prediction response with the echoed input snapshot
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub irrigate: bool,
    /// Fraction of trees voting to irrigate, in [0, 1]
    pub confidence: f32,
    pub recommendation: String,
    pub input: SensorReading,
}

/// Run a prediction for the submitted reading
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> AppResult<Json<PredictResponse>> {
    request.validate()?;

    let reading = request.into_reading();
    let decision = state.predictor.predict(&reading)?;

    let recommendation = if decision.irrigate {
        "Irrigation is RECOMMENDED for current conditions.".to_string()
    } else {
        "No irrigation required at this time.".to_string()
    };

    tracing::debug!(
        irrigate = decision.irrigate,
        confidence = decision.confidence,
        "prediction served"
    );

    Ok(Json(PredictResponse {
        irrigate: decision.irrigate,
        confidence: decision.confidence,
        recommendation,
        input: reading,
    }))
}

/// Metadata about the model currently being served
pub async fn model_info(State(state): State<AppState>) -> AppResult<Json<ModelInfo>> {
    Ok(Json(state.predictor.model_info()))
}
