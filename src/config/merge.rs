//! Merging YAML overrides onto the environment-derived configuration.

use std::path::PathBuf;

use super::env::load_from_env;
use super::yaml::YamlConfig;
use super::{JudgeKind, ServerConfig};

/// Environment variables form the base; any value present in YAML wins.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = load_from_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
    }

    if let Some(providers) = yaml.providers {
        if providers.deepgram_api_key.is_some() {
            config.deepgram_api_key = providers.deepgram_api_key;
        }
        if providers.groq_api_key.is_some() {
            config.groq_api_key = providers.groq_api_key;
        }
        if let Some(url) = providers.deepgram_url {
            config.deepgram_url = url;
        }
        if let Some(model) = providers.deepgram_model {
            config.deepgram_model = model;
        }
        if let Some(language) = providers.deepgram_language {
            config.deepgram_language = language;
        }
        if let Some(url) = providers.groq_url {
            config.groq_url = url;
        }
        if let Some(model) = providers.groq_model {
            config.groq_model = model;
        }
        if let Some(secs) = providers.request_timeout_seconds {
            config.request_timeout_seconds = secs;
        }
    }

    if let Some(story) = yaml.story {
        if let Some(judge) = story.judge {
            config.judge = judge.parse::<JudgeKind>()?;
        }
        if let Some(secs) = story.session_idle_timeout_seconds {
            config.session_idle_timeout_seconds = secs;
        }
        if let Some(max) = story.max_sessions {
            config.max_sessions = max;
        }
    }

    if let Some(voice) = yaml.voice {
        if let Some(name) = voice.name {
            config.tts_voice = name;
        }
        if let Some(rate) = voice.rate {
            config.tts_rate = rate;
        }
    }

    if let Some(storage) = yaml.storage {
        if let Some(dir) = storage.static_dir {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(index) = storage.index_file {
            config.index_file = index;
        }
        if let Some(dir) = storage.scratch_dir {
            config.scratch_dir = PathBuf::from(dir);
        }
    }

    if let Some(security) = yaml.security {
        if security.cors_allowed_origins.is_some() {
            config.cors_allowed_origins = security.cors_allowed_origins;
        }
        if let Some(rps) = security.rate_limit_requests_per_second {
            config.rate_limit_requests_per_second = rps;
        }
        if let Some(burst) = security.rate_limit_burst_size {
            config.rate_limit_burst_size = burst;
        }
    }

    Ok(config)
}
