use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by language-model providers
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LLMError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("Provider error: {0}")]
    ProviderError(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Single-turn text completion.
#[async_trait]
pub trait BaseLLM: Send + Sync {
    /// Send `prompt` as one user message and return the assistant reply text.
    async fn complete(&self, prompt: &str) -> Result<String, LLMError>;

    /// Model identifier used in logs
    fn model_name(&self) -> &str;
}
