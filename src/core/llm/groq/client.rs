use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::config::GroqChatConfig;
use super::messages::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, GroqErrorResponse};
use crate::core::llm::{BaseLLM, LLMError};

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("Zippy-Gateway/", env!("CARGO_PKG_VERSION"));

/// Groq chat completions client
pub struct GroqLLM {
    config: GroqChatConfig,
    http_client: Client,
}

impl GroqLLM {
    pub fn new(config: GroqChatConfig) -> Result<Self, LLMError> {
        config.validate().map_err(LLMError::ConfigurationError)?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                LLMError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> LLMError {
        let error_msg = match serde_json::from_str::<GroqErrorResponse>(body) {
            Ok(parsed) => format!(
                "Groq API error: {} ({})",
                parsed.error.message,
                parsed.error.error_type.as_deref().unwrap_or("unknown")
            ),
            Err(_) => format!("Groq API error ({status}): {body}"),
        };

        match status.as_u16() {
            401 | 403 => LLMError::AuthenticationFailed(error_msg),
            429 => LLMError::RateLimited(error_msg),
            400 | 404 | 422 => LLMError::ConfigurationError(error_msg),
            500..=599 => LLMError::ProviderError(format!("Server error: {error_msg}")),
            _ => LLMError::ProviderError(error_msg),
        }
    }
}

#[async_trait]
impl BaseLLM for GroqLLM {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        let request = self.build_request(prompt);

        debug!("Invoking Groq model {}", self.config.model);

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| LLMError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LLMError::NetworkError(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| LLMError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        parsed
            .first_content()
            .map(|content| content.trim().to_string())
            .ok_or_else(|| LLMError::InvalidResponse("Response contained no choices".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
