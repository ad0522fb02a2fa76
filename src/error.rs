//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::data::export::ExportError;
use crate::data::AggregateError;
use crate::models::FilterError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Request errors
    #[error("validation error: {0}")]
    ValidationError(String),

    // Aggregate errors
    #[error("insufficient data: {required} records required, {available} available")]
    InsufficientData { required: usize, available: usize },

    // Export errors
    #[error("export error: {0}")]
    ExportError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InsufficientData { .. } => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::ExportError(msg) => {
                tracing::error!("Export error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Export failed".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<AggregateError> for AppError {
    fn from(err: AggregateError) -> Self {
        match err {
            AggregateError::InsufficientData { required, available } => {
                AppError::InsufficientData { required, available }
            }
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::ExportError(err.to_string())
    }
}
