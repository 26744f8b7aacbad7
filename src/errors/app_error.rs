use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::llm::LLMError;
use crate::core::stt::STTError;
use crate::core::tts::TTSError;

/// Request-level failure, tagged with the pipeline stage that failed.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid upload: {0}")]
    Upload(String),

    #[error("Transcription failed: {0}")]
    Transcription(#[from] STTError),

    #[error("Classification failed: {0}")]
    Classification(#[from] LLMError),

    #[error("Synthesis failed: {0}")]
    Synthesis(#[from] TTSError),

    #[error("Storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn stage(&self) -> &'static str {
        match self {
            AppError::Upload(_) => "upload",
            AppError::Transcription(_) => "transcription",
            AppError::Classification(_) => "classification",
            AppError::Synthesis(_) => "synthesis",
            AppError::Storage(_) => "storage",
            AppError::Configuration(_) => "configuration",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Upload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(stage = self.stage(), "{}", self);
        } else {
            warn!(stage = self.stage(), "{}", self);
        }

        (
            status,
            Json(json!({
                "error": self.to_string(),
                "stage": self.stage(),
            })),
        )
            .into_response()
    }
}
