use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Io { .. } | AppError::Encode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            AppError::Validation(message) => message.clone(),
            other => {
                error!("Request failed: {other}");
                "Something went wrong on our end. Please try again.".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
