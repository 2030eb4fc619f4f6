//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Validation errors (caller contract violations)
    ValidationError(String),

    // Classifier absent or incompatible with the feature schema
    ModelUnavailable(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::ModelUnavailable(msg) => {
                tracing::error!("Classifier unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Classifier model is not available")
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<phishguard_core::EngineError> for AppError {
    fn from(err: phishguard_core::EngineError) -> Self {
        match err {
            phishguard_core::EngineError::InvalidConcurrency(_) => {
                AppError::ValidationError(err.to_string())
            }
            other => AppError::InternalError(other.to_string()),
        }
    }
}
