//! WebAssembly module for the Smart Irrigation System
//!
//! Provides client-side computation for the dashboard:
//! - Input bounds validation before a request is sent
//! - Preview of the deterministic irrigation rule
//! - Feature encoding for display and debugging

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

use shared::features::{training_columns, FeatureRow};
use shared::models::{needs_irrigation, SensorReading};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Validate the five numeric inputs; returns the first violation, if any
#[wasm_bindgen]
pub fn validate_inputs(
    temperature: f32,
    humidity: f32,
    soil_moisture: f32,
    wind_speed: f32,
    rainfall_forecast: f32,
) -> Option<String> {
    let checks = [
        shared::validation::validate_temperature(temperature),
        shared::validation::validate_humidity(humidity),
        shared::validation::validate_soil_moisture(soil_moisture),
        shared::validation::validate_wind_speed(wind_speed),
        shared::validation::validate_rainfall(rainfall_forecast),
    ];
    checks
        .into_iter()
        .find_map(|check| check.err().map(|message| message.to_string()))
}

/// What the deterministic rule would decide for these conditions
#[wasm_bindgen]
pub fn rule_preview(soil_moisture: f32, rainfall_forecast: f32) -> bool {
    needs_irrigation(soil_moisture, rainfall_forecast)
}

/// Encode a reading (as JSON) into ordered `[column, value]` pairs
#[wasm_bindgen]
pub fn encode_features_json(reading_json: &str) -> Result<String, JsValue> {
    let reading: SensorReading = serde_json::from_str(reading_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid reading JSON: {}", e)))?;

    let row = FeatureRow::encode(&reading);
    serde_json::to_string(row.pairs())
        .map_err(|e| JsValue::from_str(&format!("Encoding failed: {}", e)))
}

/// The canonical training-time column order, as a JSON array of strings
#[wasm_bindgen]
pub fn training_columns_json() -> String {
    serde_json::to_string(&training_columns()).unwrap_or_else(|_| "[]".to_string())
}
