use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::pdf::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every provider failure is a named variant rather than an opaque error string,
/// so callers are forced to handle each case.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    #[error("Content blocked by AI safety filters")]
    ContentBlocked,

    #[error("AI response stopped due to safety concerns")]
    GenerationStopped,

    #[error("Empty response from AI service")]
    EmptyResponse,

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Recovered locally by the user fixing their input; not an error log.
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
            }
            AppError::CorruptDocument(msg) => {
                tracing::error!("Corrupt document: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "CORRUPT_DOCUMENT",
                    "Invalid PDF file. Please upload a valid PDF.".to_string(),
                )
            }
            AppError::ContentBlocked => {
                tracing::error!("Content blocked by AI safety filters");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "CONTENT_BLOCKED",
                    "Content was blocked by AI safety filters. Please try with different content."
                        .to_string(),
                )
            }
            AppError::GenerationStopped => {
                tracing::error!("AI response stopped due to safety concerns");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "GENERATION_STOPPED",
                    "AI response was stopped due to safety concerns. Please try again."
                        .to_string(),
                )
            }
            AppError::EmptyResponse => {
                tracing::warn!("Empty response from AI service");
                (
                    StatusCode::BAD_GATEWAY,
                    "EMPTY_RESPONSE",
                    "Received empty response from AI service. Please try again.".to_string(),
                )
            }
            AppError::Upstream(detail) => {
                tracing::error!("Upstream AI service error: {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "Error communicating with AI service. Please try again later.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
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

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::ContentBlocked => AppError::ContentBlocked,
            LlmError::GenerationStopped => AppError::GenerationStopped,
            LlmError::EmptyResponse => AppError::EmptyResponse,
            LlmError::Http(e) => AppError::Upstream(e.to_string()),
            LlmError::Api { status, message } => {
                AppError::Upstream(format!("status {status}: {message}"))
            }
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Corrupt(msg) => AppError::CorruptDocument(msg),
            RenderError::EmptyDocument => {
                AppError::CorruptDocument("the PDF file contains no pages".to_string())
            }
            RenderError::Rasterize(msg) | RenderError::Encode(msg) => {
                AppError::Internal(anyhow::anyhow!("preview rendering failed: {msg}"))
            }
        }
    }
}
