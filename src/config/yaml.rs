use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present here
/// override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 8000
///
/// providers:
///   deepgram_api_key: "your-deepgram-key"
///   deepgram_model: "nova-2"
///   deepgram_language: "en-IN"
///   groq_api_key: "gsk_..."
///   groq_model: "llama-3.1-8b-instant"
///   request_timeout_seconds: 30
///
/// story:
///   judge: "llm"
///   session_idle_timeout_seconds: 3600
///   max_sessions: 10000
///
/// voice:
///   name: "en-US-AnaNeural"
///   rate: "+10%"
///
/// storage:
///   static_dir: "static"
///   index_file: "index.html"
///   scratch_dir: "/tmp"
///
/// security:
///   cors_allowed_origins: "*"
///   rate_limit_requests_per_second: 60
///   rate_limit_burst_size: 10
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub providers: Option<ProvidersYaml>,
    pub story: Option<StoryYaml>,
    pub voice: Option<VoiceYaml>,
    pub storage: Option<StorageYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Provider keys and endpoints from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersYaml {
    pub deepgram_api_key: Option<String>,
    pub deepgram_url: Option<String>,
    pub deepgram_model: Option<String>,
    pub deepgram_language: Option<String>,
    pub groq_api_key: Option<String>,
    pub groq_url: Option<String>,
    pub groq_model: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

/// Story engine configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StoryYaml {
    /// "llm" or "keyword"
    pub judge: Option<String>,
    pub session_idle_timeout_seconds: Option<u64>,
    pub max_sessions: Option<u64>,
}

/// Synthesis voice configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct VoiceYaml {
    pub name: Option<String>,
    pub rate: Option<String>,
}

/// Filesystem locations from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageYaml {
    pub static_dir: Option<String>,
    pub index_file: Option<String>,
    pub scratch_dir: Option<String>,
}

/// Security configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    /// CORS allowed origins (comma-separated list or "*" for all)
    pub cors_allowed_origins: Option<String>,
    /// Maximum requests per second per IP address
    pub rate_limit_requests_per_second: Option<u32>,
    /// Maximum burst size for rate limiting
    pub rate_limit_burst_size: Option<u32>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Required fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
