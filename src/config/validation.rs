//! Configuration validation.

use std::sync::LazyLock;

use regex::Regex;

use super::{JudgeKind, ServerConfig};

static PROSODY_RATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]\d{1,3}%$").expect("prosody rate pattern is valid")
});

/// Run every check against a fully merged configuration.
pub(super) fn validate(config: &ServerConfig) -> Result<(), String> {
    validate_provider_keys(config)?;
    validate_tts_rate(&config.tts_rate)?;
    validate_positive("REQUEST_TIMEOUT_SECONDS", config.request_timeout_seconds)?;
    validate_positive("MAX_SESSIONS", config.max_sessions)?;
    Ok(())
}

/// Missing keys fail at startup instead of surfacing later as provider 401s.
pub(super) fn validate_provider_keys(config: &ServerConfig) -> Result<(), String> {
    if config.deepgram_api_key.is_none() {
        return Err(
            "DEEPGRAM_API_KEY is not set; transcription cannot work without it".to_string(),
        );
    }
    if config.judge == JudgeKind::Llm && config.groq_api_key.is_none() {
        return Err(
            "GROQ_API_KEY is not set; set it or use STORY_JUDGE=keyword for offline judging"
                .to_string(),
        );
    }
    Ok(())
}

/// Prosody rates look like "+10%" or "-5%".
pub(super) fn validate_tts_rate(rate: &str) -> Result<(), String> {
    if PROSODY_RATE.is_match(rate) {
        Ok(())
    } else {
        Err(format!(
            "Invalid TTS_RATE '{rate}': expected a signed percentage such as '+10%'"
        ))
    }
}

fn validate_positive(name: &str, value: u64) -> Result<(), String> {
    if value == 0 {
        Err(format!("{name} must be greater than zero"))
    } else {
        Ok(())
    }
}
