use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::mediation::MediationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Mediation(#[from] MediationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Mediation(e @ MediationError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, e.kind(), msg.clone())
            }
            AppError::Mediation(e @ MediationError::Upstream(_)) => {
                tracing::error!("Model gateway error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    e.kind(),
                    "The AI service could not be reached".to_string(),
                )
            }
            AppError::Mediation(e) => {
                tracing::error!("Model reply rejected: {e}");
                (StatusCode::BAD_GATEWAY, e.kind(), e.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
