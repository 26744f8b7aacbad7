use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::config::DeepgramSTTConfig;
use super::messages::{DeepgramErrorResponse, DeepgramResponse};
use crate::core::stt::{BaseSTT, STTError};

/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// User-Agent header value for API requests.
const USER_AGENT: &str = concat!("Zippy-Gateway/", env!("CARGO_PKG_VERSION"));

/// Deepgram pre-recorded transcription client.
///
/// Holds a pooled reqwest client; cheap to share behind an `Arc`.
pub struct DeepgramSTT {
    config: DeepgramSTTConfig,
    http_client: Client,
}

impl DeepgramSTT {
    /// Create a new Deepgram client.
    ///
    /// # Errors
    /// Returns `STTError::ConfigurationError` for an empty key, an invalid
    /// endpoint, or when the HTTP client cannot be built.
    pub fn new(config: DeepgramSTTConfig) -> Result<Self, STTError> {
        config.validate().map_err(STTError::ConfigurationError)?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                STTError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Map a non-2xx response onto the error taxonomy.
    fn classify_error(status: reqwest::StatusCode, body: &str) -> STTError {
        let error_msg = match serde_json::from_str::<DeepgramErrorResponse>(body) {
            Ok(parsed) => format!("Deepgram API error: {}", parsed.message()),
            Err(_) => format!("Deepgram API error ({status}): {body}"),
        };

        match status.as_u16() {
            400 | 415 => STTError::AudioProcessingError(error_msg),
            401 | 403 => STTError::AuthenticationFailed(error_msg),
            402 | 429 => STTError::ProviderError(format!("Quota or rate limit: {error_msg}")),
            500..=599 => STTError::ProviderError(format!("Server error: {error_msg}")),
            _ => STTError::ProviderError(error_msg),
        }
    }
}

#[async_trait]
impl BaseSTT for DeepgramSTT {
    async fn transcribe(&self, audio: Bytes) -> Result<String, STTError> {
        let url = self
            .config
            .request_url()
            .map_err(STTError::ConfigurationError)?;

        debug!(
            "Sending {} bytes to Deepgram (model={}, language={})",
            audio.len(),
            self.config.model,
            self.config.language
        );

        let response = self
            .http_client
            .post(url)
            .header("Authorization", format!("Token {}", self.config.api_key))
            .header("Content-Type", "audio/*")
            .body(audio)
            .send()
            .await
            .map_err(|e| STTError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| STTError::NetworkError(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        let transcript = DeepgramResponse::transcript_from_body(&body);
        if transcript == crate::core::stt::TRANSCRIPT_SENTINEL {
            warn!("Deepgram response carried no usable transcript, using sentinel");
        } else {
            info!("Deepgram transcript: {}", transcript);
        }

        Ok(transcript)
    }

    fn get_provider_info(&self) -> &'static str {
        "deepgram"
    }
}
