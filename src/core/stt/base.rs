use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Text used in place of a transcript when the provider answered but the
/// response carried no usable transcript.
pub const TRANSCRIPT_SENTINEL: &str = "...";

/// Errors raised by speech-to-text providers
#[derive(Debug, Error, Clone, PartialEq)]
pub enum STTError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("Provider error: {0}")]
    ProviderError(String),
    #[error("Audio processing error: {0}")]
    AudioProcessingError(String),
}

/// One-shot transcription of a complete recording.
///
/// Implementations return [`TRANSCRIPT_SENTINEL`] instead of failing when the
/// provider response is structurally unexpected, and an [`STTError`] when the
/// provider could not be reached or rejected the request.
#[async_trait]
pub trait BaseSTT: Send + Sync {
    /// Transcribe the recording and return the best transcript
    async fn transcribe(&self, audio: Bytes) -> Result<String, STTError>;

    /// Short provider identifier used in logs
    fn get_provider_info(&self) -> &'static str;
}
