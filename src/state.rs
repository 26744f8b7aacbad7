use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::info;

use crate::config::{JudgeKind, ServerConfig};
use crate::core::llm::{GroqChatConfig, GroqLLM};
use crate::core::sessions::SessionStore;
use crate::core::storage::{AudioArtifact, AudioStore};
use crate::core::story::{KeywordJudge, LlmJudge, StoryJudge};
use crate::core::stt::{BaseSTT, DeepgramSTT, DeepgramSTTConfig};
use crate::core::tts::{BaseTTS, EdgeTTS, EdgeTTSConfig};
use crate::errors::{AppError, AppResult};

/// Application state shared by all handlers
pub struct AppState {
    pub config: ServerConfig,
    pub sessions: SessionStore,
    pub stt: Arc<dyn BaseSTT>,
    pub judge: Arc<dyn StoryJudge>,
    pub tts: Arc<dyn BaseTTS>,
    pub audio_store: AudioStore,
    /// Clip replayed for every turn after the story has ended.
    pub story_over: OnceCell<AudioArtifact>,
}

impl AppState {
    /// Build the production providers from configuration.
    pub async fn new(config: ServerConfig) -> AppResult<Arc<Self>> {
        let timeout = Duration::from_secs(config.request_timeout_seconds);

        let deepgram_key = config
            .get_api_key("deepgram")
            .map_err(AppError::Configuration)?;
        let stt = DeepgramSTT::new(DeepgramSTTConfig {
            api_key: deepgram_key,
            endpoint: config.deepgram_url.clone(),
            model: config.deepgram_model.clone(),
            language: config.deepgram_language.clone(),
            timeout,
            ..Default::default()
        })
        .map_err(|e| AppError::Configuration(e.to_string()))?;

        let judge: Arc<dyn StoryJudge> = match config.judge {
            JudgeKind::Llm => {
                let groq_key = config.get_api_key("groq").map_err(AppError::Configuration)?;
                let llm = GroqLLM::new(GroqChatConfig {
                    api_key: groq_key,
                    endpoint: config.groq_url.clone(),
                    model: config.groq_model.clone(),
                    timeout,
                    ..Default::default()
                })
                .map_err(|e| AppError::Configuration(e.to_string()))?;
                Arc::new(LlmJudge::new(Arc::new(llm)))
            }
            JudgeKind::Keyword => Arc::new(KeywordJudge::new()),
        };

        let tts = EdgeTTS::new(EdgeTTSConfig {
            voice: config.tts_voice.clone(),
            rate: config.tts_rate.clone(),
            timeout,
            ..Default::default()
        })
        .map_err(|e| AppError::Configuration(e.to_string()))?;

        info!(
            "Providers ready: stt=deepgram ({}), judge={}, tts=edge ({})",
            config.deepgram_model,
            judge.name(),
            config.tts_voice
        );

        Ok(Self::with_providers(
            config,
            Arc::new(stt),
            judge,
            Arc::new(tts),
        ))
    }

    /// Assemble state around already-built providers.
    pub fn with_providers(
        config: ServerConfig,
        stt: Arc<dyn BaseSTT>,
        judge: Arc<dyn StoryJudge>,
        tts: Arc<dyn BaseTTS>,
    ) -> Arc<Self> {
        let sessions = SessionStore::new(
            config.max_sessions,
            Duration::from_secs(config.session_idle_timeout_seconds),
        );
        let audio_store = AudioStore::new(config.static_dir.clone());

        Arc::new(Self {
            config,
            sessions,
            stt,
            judge,
            tts,
            audio_store,
            story_over: OnceCell::new(),
        })
    }
}
