use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{API_NAME, CAR_ALREADY_REGISTERED, INTERNAL_SERVER_ERROR};
use crate::repository::StoreError;
use crate::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::Validation(err.errors)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicatePlate { .. } => AppError::Conflict(CAR_ALREADY_REGISTERED.to_string()),
            StoreError::Database(e) => AppError::Database(e),
            StoreError::Unavailable(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let errors = match self {
            AppError::Validation(errors) => {
                tracing::warn!("{} Validation error: {}", API_NAME, errors.join(", "));
                errors
            }
            AppError::NotFound(msg) => {
                tracing::warn!("{} Not found: {}", API_NAME, msg);
                vec![msg]
            }
            AppError::Conflict(msg) => {
                tracing::warn!("{} Conflict: {}", API_NAME, msg);
                vec![msg]
            }
            AppError::Database(e) => {
                tracing::error!("{} Database error: {}", API_NAME, e);
                vec![INTERNAL_SERVER_ERROR.to_string()]
            }
            AppError::Internal(e) => {
                tracing::error!("{} Internal error: {:#}", API_NAME, e);
                vec![INTERNAL_SERVER_ERROR.to_string()]
            }
        };

        (status, Json(json!({ "errors": errors }))).into_response()
    }
}
