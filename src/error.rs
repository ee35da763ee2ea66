use crate::adapters::StorageError;
use crate::domain::message::MissingRequiredFields;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("Origin not allowed")]
    OriginNotAllowed,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<MissingRequiredFields> for AppError {
    fn from(e: MissingRequiredFields) -> Self {
        Self::Validation(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(msg) => {
                tracing::debug!(message = %msg, "Validation failed");
                (StatusCode::BAD_REQUEST, msg)
            }
            Self::Storage(e) => {
                tracing::error!(error = %e, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            Self::PayloadTooLarge => {
                tracing::debug!("Request body too large");
                (StatusCode::PAYLOAD_TOO_LARGE, Self::PayloadTooLarge.to_string())
            }
            Self::OriginNotAllowed => {
                tracing::debug!("Rejected cross-origin request");
                (StatusCode::FORBIDDEN, Self::OriginNotAllowed.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
