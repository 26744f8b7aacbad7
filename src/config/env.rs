//! Environment variable loading.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::{JudgeKind, ServerConfig};

/// Read a variable, treating empty strings as unset.
pub(super) fn env_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse a variable, reporting the variable name on failure.
pub(super) fn parse_env<T>(name: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_var(name) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {name}: '{raw}' ({e})")),
        None => Ok(None),
    }
}

/// Build a configuration from defaults overlaid with environment variables.
pub(super) fn load_from_env() -> Result<ServerConfig, String> {
    let mut config = ServerConfig::default();

    if let Some(host) = env_var("HOST") {
        config.host = host;
    }
    if let Some(port) = parse_env::<u16>("PORT")? {
        config.port = port;
    }

    config.deepgram_api_key = env_var("DEEPGRAM_API_KEY");
    config.groq_api_key = env_var("GROQ_API_KEY");

    if let Some(url) = env_var("DEEPGRAM_URL") {
        config.deepgram_url = url;
    }
    if let Some(model) = env_var("DEEPGRAM_MODEL") {
        config.deepgram_model = model;
    }
    if let Some(language) = env_var("DEEPGRAM_LANGUAGE") {
        config.deepgram_language = language;
    }

    if let Some(judge) = parse_env::<JudgeKind>("STORY_JUDGE")? {
        config.judge = judge;
    }
    if let Some(url) = env_var("GROQ_URL") {
        config.groq_url = url;
    }
    if let Some(model) = env_var("GROQ_MODEL") {
        config.groq_model = model;
    }

    if let Some(voice) = env_var("TTS_VOICE") {
        config.tts_voice = voice;
    }
    if let Some(rate) = env_var("TTS_RATE") {
        config.tts_rate = rate;
    }

    if let Some(dir) = env_var("STATIC_DIR") {
        config.static_dir = PathBuf::from(dir);
    }
    if let Some(index) = env_var("INDEX_FILE") {
        config.index_file = index;
    }
    if let Some(dir) = env_var("SCRATCH_DIR") {
        config.scratch_dir = PathBuf::from(dir);
    }

    if let Some(secs) = parse_env::<u64>("REQUEST_TIMEOUT_SECONDS")? {
        config.request_timeout_seconds = secs;
    }
    if let Some(secs) = parse_env::<u64>("SESSION_IDLE_TIMEOUT_SECONDS")? {
        config.session_idle_timeout_seconds = secs;
    }
    if let Some(max) = parse_env::<u64>("MAX_SESSIONS")? {
        config.max_sessions = max;
    }

    if let Some(origins) = env_var("CORS_ALLOWED_ORIGINS") {
        config.cors_allowed_origins = Some(origins);
    }
    if let Some(rps) = parse_env::<u32>("RATE_LIMIT_REQUESTS_PER_SECOND")? {
        config.rate_limit_requests_per_second = rps;
    }
    if let Some(burst) = parse_env::<u32>("RATE_LIMIT_BURST_SIZE")? {
        config.rate_limit_burst_size = burst;
    }

    Ok(config)
}
