use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the user and training services.
///
/// `InvalidState` and `NotFound` are definitive outcomes and must not be
/// retried; database failures propagate unchanged from the storage layer.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidState(_) => (StatusCode::CONFLICT, "Record already persisted"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Record not found"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
