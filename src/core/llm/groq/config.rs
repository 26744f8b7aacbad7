//! Configuration for the Groq chat client.

use std::time::Duration;

/// Groq OpenAI-compatible chat completions endpoint.
pub const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Small, fast model; good enough for a three-way judgement.
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Debug, Clone)]
pub struct GroqChatConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    /// Sampling temperature; 0.0 keeps the judgement deterministic
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

impl Default for GroqChatConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: GROQ_CHAT_URL.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: Some(256),
            timeout: Duration::from_secs(30),
        }
    }
}

impl GroqChatConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("API key is required".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("Model is required".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        Ok(())
    }
}
