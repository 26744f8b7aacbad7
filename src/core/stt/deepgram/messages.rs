//! Message types for Deepgram pre-recorded API responses.
//!
//! Every level is optional so that a structurally surprising body still
//! deserializes; [`DeepgramResponse::best_transcript`] decides what is usable.

use serde::{Deserialize, Serialize};

use crate::core::stt::TRANSCRIPT_SENTINEL;

/// Top-level `/v1/listen` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepgramResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<ListenResults>,
}

/// The `results` object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListenResults {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// One audio channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Channel {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

/// One transcript hypothesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Alternative {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl DeepgramResponse {
    /// Top alternative of the first channel, if present and non-blank.
    pub fn transcript(&self) -> Option<&str> {
        self.results
            .as_ref()?
            .channels
            .first()?
            .alternatives
            .first()?
            .transcript
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Transcript or the sentinel when nothing usable came back.
    pub fn best_transcript(&self) -> String {
        self.transcript()
            .map(str::to_string)
            .unwrap_or_else(|| TRANSCRIPT_SENTINEL.to_string())
    }

    /// Parse a response body, degrading to the sentinel on malformed JSON.
    pub fn transcript_from_body(body: &str) -> String {
        match serde_json::from_str::<DeepgramResponse>(body) {
            Ok(response) => response.best_transcript(),
            Err(_) => TRANSCRIPT_SENTINEL.to_string(),
        }
    }
}

/// Error body returned by Deepgram on non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepgramErrorResponse {
    #[serde(default)]
    pub err_code: Option<String>,
    #[serde(default)]
    pub err_msg: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

impl DeepgramErrorResponse {
    pub fn message(&self) -> String {
        match (&self.err_code, &self.err_msg) {
            (Some(code), Some(msg)) => format!("{msg} ({code})"),
            (None, Some(msg)) => msg.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}
