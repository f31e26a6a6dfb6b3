//! Error handling

use axum::{
    extract::rejection::{FormRejection, JsonRejection, QueryRejection},
    response::{Html, IntoResponse, Response},
    http::StatusCode,
    Json,
};
use dropout_core::logic::features::layout::LayoutMismatchError;
use dropout_core::{AdvisorError, InferenceError};
use serde_json::json;
use thiserror::Error;

use crate::views;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    LayoutMismatch(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Status code and the message safe to show a client
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::LayoutMismatch(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::ModelError(msg) => {
                tracing::error!("Model error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed".to_string())
            }
            AppError::ExternalServiceError(msg) => {
                tracing::error!("External service error: {}", msg);
                (StatusCode::BAD_GATEWAY, "AI recommendation service error".to_string())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

/// Same errors, rendered as a page for the form routes
#[derive(Debug)]
pub struct HtmlError(pub AppError);

impl From<AppError> for HtmlError {
    fn from(err: AppError) -> Self {
        HtmlError(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.status_and_message();
        (status, Html(views::page::render_error(status.as_u16(), &message))).into_response()
    }
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        AppError::ModelError(err.to_string())
    }
}

impl From<AdvisorError> for AppError {
    fn from(err: AdvisorError) -> Self {
        AppError::ExternalServiceError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut fields: Vec<&str> = err.field_errors().keys().copied().collect();
        fields.sort_unstable();
        AppError::ValidationError(format!("Out of range: {}", fields.join(", ")))
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<LayoutMismatchError> for AppError {
    fn from(err: LayoutMismatchError) -> Self {
        AppError::LayoutMismatch(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(err.to_string())
    }
}
