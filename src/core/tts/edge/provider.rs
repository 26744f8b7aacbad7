use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::{SinkExt, StreamExt};
use time::OffsetDateTime;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::config::{EDGE_ORIGIN, EDGE_USER_AGENT, EdgeTTSConfig};
use super::messages::{
    ServerFrame, build_ssml, sec_ms_gec, speech_config_frame, ssml_frame, timestamp,
};
use crate::core::tts::{BaseTTS, TTSError, TTSResult};

/// Edge read-aloud synthesizer.
///
/// Opens one WebSocket per utterance; nothing is kept between calls.
pub struct EdgeTTS {
    config: EdgeTTSConfig,
    voice_name: String,
}

impl EdgeTTS {
    pub fn new(config: EdgeTTSConfig) -> TTSResult<Self> {
        config.validate().map_err(TTSError::InvalidConfiguration)?;
        let voice_name = config.voice_name().ok_or_else(|| {
            TTSError::InvalidConfiguration(format!("Unsupported voice '{}'", config.voice))
        })?;

        Ok(Self { config, voice_name })
    }

    fn connection_request(
        &self,
    ) -> TTSResult<tokio_tungstenite::tungstenite::handshake::client::Request> {
        let unix_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let connection_id = Uuid::new_v4().simple().to_string();

        let url = self
            .config
            .connection_url(&sec_ms_gec(unix_secs), &connection_id)
            .map_err(TTSError::InvalidConfiguration)?;

        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|e| TTSError::InvalidConfiguration(format!("Invalid WebSocket URL: {e}")))?;

        let headers = request.headers_mut();
        headers.insert("Origin", HeaderValue::from_static(EDGE_ORIGIN));
        headers.insert("User-Agent", HeaderValue::from_static(EDGE_USER_AGENT));
        headers.insert("Pragma", HeaderValue::from_static("no-cache"));
        headers.insert("Cache-Control", HeaderValue::from_static("no-cache"));

        Ok(request)
    }

    async fn run_exchange(&self, text: &str) -> TTSResult<Bytes> {
        let request = self.connection_request()?;

        let (ws_stream, _response) = connect_async(request)
            .await
            .map_err(|e| TTSError::ConnectionFailed(format!("WebSocket connect failed: {e}")))?;
        let (mut ws_sink, mut ws_stream) = ws_stream.split();

        let now = timestamp(OffsetDateTime::now_utc());
        let request_id = Uuid::new_v4().simple().to_string();
        let ssml = build_ssml(&self.config, &self.voice_name, text);

        for frame in [
            speech_config_frame(&now),
            ssml_frame(&request_id, &now, &ssml),
        ] {
            ws_sink
                .send(Message::Text(frame.into()))
                .await
                .map_err(|e| TTSError::ConnectionFailed(format!("Failed to send frame: {e}")))?;
        }

        let mut audio = BytesMut::new();
        let mut turn_ended = false;

        while let Some(message) = ws_stream.next().await {
            let message = message
                .map_err(|e| TTSError::ConnectionFailed(format!("WebSocket read failed: {e}")))?;

            match message {
                Message::Text(text) => match ServerFrame::from_text(text.as_str()) {
                    ServerFrame::TurnEnd => {
                        turn_ended = true;
                        break;
                    }
                    ServerFrame::Other(path) => debug!("Edge TTS frame: {}", path),
                    ServerFrame::Audio(_) => {}
                },
                Message::Binary(data) => match ServerFrame::from_binary(data) {
                    Ok(ServerFrame::Audio(chunk)) => audio.extend_from_slice(&chunk),
                    Ok(_) => {}
                    Err(e) => return Err(TTSError::ProtocolError(e)),
                },
                Message::Close(frame) => {
                    debug!("Edge TTS closed the connection: {:?}", frame);
                    break;
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }

        let _ = ws_sink.send(Message::Close(None)).await;

        if !turn_ended {
            warn!("Edge TTS stream ended without turn.end");
        }
        if audio.is_empty() {
            return Err(TTSError::EmptyAudio);
        }

        Ok(audio.freeze())
    }
}

#[async_trait]
impl BaseTTS for EdgeTTS {
    async fn synthesize(&self, text: &str) -> TTSResult<Bytes> {
        debug!(
            "Synthesizing {} chars with {} (rate {})",
            text.len(),
            self.config.voice,
            self.config.rate
        );

        let audio = timeout(self.config.timeout, self.run_exchange(text))
            .await
            .map_err(|_| TTSError::Timeout(self.config.timeout.as_secs()))??;

        info!("Edge TTS produced {} bytes of audio", audio.len());
        Ok(audio)
    }

    fn get_provider_info(&self) -> &'static str {
        "edge"
    }
}
