//! Configuration module for the Zippy story gateway
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use zippy_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

mod env;
mod merge;
mod validation;
mod yaml;

pub use yaml::YamlConfig;

/// Default Deepgram pre-recorded transcription endpoint
pub const DEFAULT_DEEPGRAM_URL: &str = "https://api.deepgram.com/v1/listen";
/// Default Groq OpenAI-compatible chat completions endpoint
pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Which classifier judges the child's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JudgeKind {
    /// Hosted language model (Groq chat completions)
    #[default]
    Llm,
    /// Offline keyword rules, no network access
    Keyword,
}

impl FromStr for JudgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "llm" | "groq" => Ok(JudgeKind::Llm),
            "keyword" | "keywords" | "rules" => Ok(JudgeKind::Keyword),
            other => Err(format!(
                "Unsupported story judge: {other}. Supported judges: llm, keyword"
            )),
        }
    }
}

impl fmt::Display for JudgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JudgeKind::Llm => write!(f, "llm"),
            JudgeKind::Keyword => write!(f, "keyword"),
        }
    }
}

/// Server configuration
///
/// Contains everything needed to run the story gateway:
/// - Server settings (host, port)
/// - Provider API keys and endpoints (Deepgram, Groq)
/// - Voice settings for synthesis
/// - Filesystem locations (static assets, scratch uploads)
/// - Session store limits
/// - Security settings (CORS, rate limiting)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // Provider API keys
    pub deepgram_api_key: Option<String>,
    pub groq_api_key: Option<String>,

    // Transcription
    pub deepgram_url: String,
    pub deepgram_model: String,
    pub deepgram_language: String,

    // Classification
    pub judge: JudgeKind,
    pub groq_url: String,
    pub groq_model: String,

    // Synthesis
    /// Short voice name, e.g. "en-US-AnaNeural"
    pub tts_voice: String,
    /// Prosody rate adjustment, e.g. "+10%"
    pub tts_rate: String,

    // Filesystem
    /// Directory served under `/static`; generated audio lands here
    pub static_dir: PathBuf,
    /// Entry page served at `/`, relative to `static_dir`
    pub index_file: String,
    /// Directory for temporary upload blobs
    pub scratch_dir: PathBuf,

    /// Per-call timeout for external APIs
    pub request_timeout_seconds: u64,

    // Sessions
    pub session_idle_timeout_seconds: u64,
    pub max_sessions: u64,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: "*" (open, demo deployment)
    pub cors_allowed_origins: Option<String>,
    /// Maximum requests per second per IP address
    pub rate_limit_requests_per_second: u32,
    /// Maximum burst size for rate limiting
    pub rate_limit_burst_size: u32,
}

/// Zeroize provider keys when the configuration is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.deepgram_api_key {
            key.zeroize();
        }
        if let Some(ref mut key) = self.groq_api_key {
            key.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// The .env file is loaded by `main` before this is called, so values from it
    /// are visible here as regular environment variables.
    ///
    /// # Errors
    /// Returns an error if a variable has an invalid format or a required
    /// provider key is missing.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Path of the entry page served at `/`
    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }

    /// Get API key for a specific provider
    ///
    /// # Arguments
    /// * `provider` - "deepgram" or "groq" (case-insensitive)
    pub fn get_api_key(&self, provider: &str) -> Result<String, String> {
        match provider.to_lowercase().as_str() {
            "deepgram" => self.deepgram_api_key.as_ref().cloned().ok_or_else(|| {
                "Deepgram API key not configured in server environment (DEEPGRAM_API_KEY)"
                    .to_string()
            }),
            "groq" => self.groq_api_key.as_ref().cloned().ok_or_else(|| {
                "Groq API key not configured in server environment (GROQ_API_KEY)".to_string()
            }),
            _ => Err(format!("Unsupported provider: {provider}")),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            deepgram_api_key: None,
            groq_api_key: None,
            deepgram_url: DEFAULT_DEEPGRAM_URL.to_string(),
            deepgram_model: "nova-2".to_string(),
            deepgram_language: "en-IN".to_string(),
            judge: JudgeKind::Llm,
            groq_url: DEFAULT_GROQ_URL.to_string(),
            groq_model: "llama-3.1-8b-instant".to_string(),
            tts_voice: "en-US-AnaNeural".to_string(),
            tts_rate: "+10%".to_string(),
            static_dir: PathBuf::from("static"),
            index_file: "index.html".to_string(),
            scratch_dir: std::env::temp_dir(),
            request_timeout_seconds: 30,
            session_idle_timeout_seconds: 3600,
            max_sessions: 10_000,
            cors_allowed_origins: Some("*".to_string()),
            rate_limit_requests_per_second: 60,
            rate_limit_burst_size: 10,
        }
    }
}
