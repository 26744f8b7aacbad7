//! Configuration for the Deepgram pre-recorded transcription client.

use std::time::Duration;

use url::Url;

/// Deepgram pre-recorded transcription endpoint.
pub const DEEPGRAM_LISTEN_URL: &str = "https://api.deepgram.com/v1/listen";

/// Default acoustic model.
pub const DEFAULT_MODEL: &str = "nova-2";

/// Default transcription language.
pub const DEFAULT_LANGUAGE: &str = "en-IN";

/// Deepgram request settings
#[derive(Debug, Clone)]
pub struct DeepgramSTTConfig {
    /// API key sent as `Authorization: Token <key>`
    pub api_key: String,
    /// Endpoint, overridable for proxies and tests
    pub endpoint: String,
    /// Acoustic model, e.g. "nova-2"
    pub model: String,
    /// BCP-47 language tag
    pub language: String,
    /// Punctuation and number formatting
    pub smart_format: bool,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for DeepgramSTTConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEEPGRAM_LISTEN_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            smart_format: true,
            timeout: Duration::from_secs(30),
        }
    }
}

impl DeepgramSTTConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("API key is required".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("Model is required".to_string());
        }
        Url::parse(&self.endpoint)
            .map_err(|e| format!("Invalid Deepgram endpoint '{}': {e}", self.endpoint))?;
        Ok(())
    }

    /// Endpoint URL with the model, formatting and language query parameters.
    pub fn request_url(&self) -> Result<Url, String> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| format!("Invalid Deepgram endpoint '{}': {e}", self.endpoint))?;
        url.query_pairs_mut()
            .append_pair("model", &self.model)
            .append_pair("smart_format", if self.smart_format { "true" } else { "false" })
            .append_pair("language", &self.language);
        Ok(url)
    }
}
