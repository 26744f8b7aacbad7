//! Mock providers for end-to-end tests.
//!
//! Deepgram and Groq are simulated with wiremock servers so the real HTTP
//! clients are exercised. Synthesis is replaced by an in-process fake that
//! records every utterance it is asked to speak.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zippy_gateway::config::JudgeKind;
use zippy_gateway::core::llm::{GroqChatConfig, GroqLLM};
use zippy_gateway::core::story::{KeywordJudge, LlmJudge, StoryJudge};
use zippy_gateway::core::stt::{DeepgramSTT, DeepgramSTTConfig};
use zippy_gateway::core::tts::{BaseTTS, TTSError, TTSResult};
use zippy_gateway::{AppState, ServerConfig, routes};

pub const FAKE_MP3: &[u8] = b"ID3\x04fake-mp3";

/// Records synthesized texts; optionally fails every call.
#[derive(Default)]
pub struct RecordingSynthesizer {
    pub spoken: Mutex<Vec<String>>,
    pub fail_with: Option<TTSError>,
}

impl RecordingSynthesizer {
    pub fn failing(error: TTSError) -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
            fail_with: Some(error),
        }
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseTTS for RecordingSynthesizer {
    async fn synthesize(&self, text: &str) -> TTSResult<Bytes> {
        self.spoken.lock().unwrap().push(text.to_string());
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(Bytes::from_static(FAKE_MP3)),
        }
    }

    fn get_provider_info(&self) -> &'static str {
        "recording"
    }
}

pub fn deepgram_body(transcript: &str) -> serde_json::Value {
    json!({
        "metadata": {"request_id": "test"},
        "results": {"channels": [{"alternatives": [{"transcript": transcript, "confidence": 0.9}]}]}
    })
}

pub fn groq_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
    })
}

/// Answer every transcription request with `transcript`.
pub async fn mount_transcript(server: &MockServer, transcript: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/listen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deepgram_body(transcript)))
        .mount(server)
        .await;
}

/// Answer every chat completion with `content`.
pub async fn mount_completion(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(groq_body(content)))
        .mount(server)
        .await;
}

pub fn test_config(static_dir: &Path, scratch_dir: &Path) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.host = "127.0.0.1".to_string();
    config.deepgram_api_key = Some("dg-test".to_string());
    config.groq_api_key = Some("gsk-test".to_string());
    config.static_dir = static_dir.to_path_buf();
    config.scratch_dir = scratch_dir.to_path_buf();
    config.request_timeout_seconds = 5;
    config
}

/// Providers wired against the mock servers.
pub struct Harness {
    pub deepgram: MockServer,
    pub groq: MockServer,
    pub tts: Arc<RecordingSynthesizer>,
    pub state: Arc<AppState>,
}

impl Harness {
    pub async fn new(config: ServerConfig, tts: RecordingSynthesizer) -> Self {
        let deepgram = MockServer::start().await;
        let groq = MockServer::start().await;
        let timeout = Duration::from_secs(config.request_timeout_seconds);

        let stt = DeepgramSTT::new(DeepgramSTTConfig {
            api_key: "dg-test".to_string(),
            endpoint: format!("{}/v1/listen", deepgram.uri()),
            timeout,
            ..Default::default()
        })
        .unwrap();

        let judge: Arc<dyn StoryJudge> = match config.judge {
            JudgeKind::Llm => {
                let llm = GroqLLM::new(GroqChatConfig {
                    api_key: "gsk-test".to_string(),
                    endpoint: format!("{}/openai/v1/chat/completions", groq.uri()),
                    timeout,
                    ..Default::default()
                })
                .unwrap();
                Arc::new(LlmJudge::new(Arc::new(llm)))
            }
            JudgeKind::Keyword => Arc::new(KeywordJudge::new()),
        };

        let tts = Arc::new(tts);
        let state = AppState::with_providers(config, Arc::new(stt), judge, tts.clone());

        Self {
            deepgram,
            groq,
            tts,
            state,
        }
    }

    pub fn app(&self) -> Router {
        routes::create_app(self.state.clone())
    }

    pub async fn deepgram_calls(&self) -> usize {
        self.deepgram.received_requests().await.unwrap_or_default().len()
    }

    pub async fn groq_calls(&self) -> usize {
        self.groq.received_requests().await.unwrap_or_default().len()
    }
}

pub const BOUNDARY: &str = "zippy-test-boundary";

/// Build a multipart/form-data body from `(name, filename, bytes)` parts.
pub fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: audio/webm\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn audio_upload(data: &[u8]) -> Vec<u8> {
    multipart_body(&[("file", Some("answer.webm"), data)])
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}
