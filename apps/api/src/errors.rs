use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;
use crate::pipeline::{ErrorKind, PipelineError};
use crate::synthesis::SynthesisError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        AppError::Pipeline(e.into())
    }
}

impl From<SynthesisError> for AppError {
    fn from(e: SynthesisError) -> Self {
        AppError::Pipeline(e.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

fn pipeline_status(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::UnsupportedFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ErrorKind::OversizeDocument => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::CorruptDocument => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::EmptyInput => StatusCode::BAD_REQUEST,
        ErrorKind::SchemaViolation => StatusCode::BAD_GATEWAY,
        ErrorKind::GenerationUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, retryable) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                false,
            ),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
                false,
            ),
            AppError::Pipeline(e) => {
                let kind = e.kind();
                let status = pipeline_status(kind);
                if status.is_server_error() {
                    tracing::error!("Pipeline error: {e}");
                } else {
                    tracing::warn!("Pipeline rejected input: {e}");
                }
                (status, kind.code(), e.to_string(), kind.is_transient())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "retryable": retryable
            }
        }));

        (status, body).into_response()
    }
}
