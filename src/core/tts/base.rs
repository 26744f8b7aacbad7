use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Errors raised by speech synthesis providers
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TTSError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Protocol error: {0}")]
    ProtocolError(String),
    #[error("Provider error: {0}")]
    ProviderError(String),
    #[error("Synthesis timed out after {0} seconds")]
    Timeout(u64),
    #[error("Provider returned no audio")]
    EmptyAudio,
}

pub type TTSResult<T> = Result<T, TTSError>;

/// Text to encoded audio, one utterance per call.
#[async_trait]
pub trait BaseTTS: Send + Sync {
    /// Synthesize `text` and return the complete encoded audio (MP3).
    async fn synthesize(&self, text: &str) -> TTSResult<Bytes>;

    fn get_provider_info(&self) -> &'static str;
}
