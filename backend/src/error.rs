//! Error handling for the Smart Irrigation System
//!
//! Provides consistent JSON error responses for the prediction API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::ml::MlError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    // Simulator errors
    #[error("Invalid sample count: {0} (must be at least 1)")]
    InvalidSampleCount(usize),

    // Trainer errors
    #[error("Training input is empty")]
    EmptyTrainingSet,

    #[error("Dataset is missing the '{0}' label column")]
    MissingLabelColumn(&'static str),

    #[error("Dataset error: {0}")]
    Dataset(String),

    // Model pipeline errors
    #[error("Model error: {0}")]
    Model(#[from] MlError),

    #[error("Artifact error: {0}")]
    Artifact(String),

    // I/O and serialization errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first offending field; the UI shows one message at a time.
        for (field, field_errors) in errors.field_errors() {
            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is out of range", field));
                return AppError::Validation {
                    field: field.to_string(),
                    message,
                };
            }
        }
        AppError::ValidationError("invalid input".to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::InvalidSampleCount(count) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_SAMPLE_COUNT".to_string(),
                    message: format!("Sample count must be at least 1, got {}", count),
                    field: None,
                },
            ),
            AppError::EmptyTrainingSet => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "EMPTY_TRAINING_SET".to_string(),
                    message: "Training input contains no records".to_string(),
                    field: None,
                },
            ),
            AppError::MissingLabelColumn(column) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "MISSING_LABEL_COLUMN".to_string(),
                    message: format!("Dataset is missing the '{}' label column", column),
                    field: None,
                },
            ),
            AppError::Dataset(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "DATASET_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::Model(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "MODEL_ERROR".to_string(),
                    message: msg.to_string(),
                    field: None,
                },
            ),
            AppError::Artifact(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "ARTIFACT_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::Io(_) | AppError::Csv(_) | AppError::Json(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "STORAGE_ERROR".to_string(),
                    message: "A file artifact could not be read or written".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
