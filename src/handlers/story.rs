//! Story endpoints.
//!
//! `POST /start` tells the intro, `POST /process_audio` takes the child's
//! recorded answer. Both reply with the spoken text and a URL to the
//! synthesized MP3.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Query, State},
    http::HeaderMap,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::sessions::{DEFAULT_SESSION_ID, SessionStore};
use crate::core::storage::AudioArtifact;
use crate::core::story::FINISHED_TEXT;
use crate::errors::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::ScratchFile;

/// Header carrying the session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Multipart field holding the recorded audio.
pub const AUDIO_FIELD: &str = "file";

const SESSION_FIELD: &str = "session_id";

#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
    pub text: String,
    pub audio_url: String,
    pub is_finished: bool,
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TurnResponse {
    pub user_said: String,
    pub text: String,
    pub audio_url: String,
    pub is_finished: bool,
    pub session_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

fn normalize(raw: Option<&str>, source: &str) -> Option<String> {
    let raw = raw?;
    let id = SessionStore::normalize_id(raw);
    if id.is_none() {
        warn!("Ignoring malformed session id from {}: {:?}", source, raw);
    }
    id
}

fn header_session_id(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(SESSION_HEADER)?.to_str().ok();
    normalize(value, "header")
}

async fn speak(state: &AppState, text: &str) -> AppResult<AudioArtifact> {
    let audio = state.tts.synthesize(text).await?;
    Ok(state.audio_store.save(&audio).await?)
}

/// The "story is over" clip, synthesized at most once per process.
async fn story_over_audio(state: &AppState) -> AppResult<AudioArtifact> {
    state
        .story_over
        .get_or_try_init(|| speak(state, FINISHED_TEXT))
        .await
        .cloned()
}

/// Start (or restart) the story.
///
/// Without an `X-Session-Id` header a fresh id is issued and the shared
/// default session is reset too, so clients that never send an id keep
/// working.
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> AppResult<Json<StartResponse>> {
    let supplied = header_session_id(&headers);
    let session_id = supplied
        .clone()
        .unwrap_or_else(SessionStore::new_session_id);

    let shared = state.sessions.get_or_create(&session_id).await;
    let mut story = shared.lock().await;
    story.restart();
    let turn = story.advance(None, state.judge.as_ref()).await?;
    drop(story);

    if supplied.is_none() {
        let default = state.sessions.get_or_create(DEFAULT_SESSION_ID).await;
        let mut story = default.lock().await;
        story.restart();
        story.advance(None, state.judge.as_ref()).await?;
    }

    let artifact = speak(&state, turn.text).await?;
    info!(
        "Story started for session {} ({}, {} active sessions)",
        session_id,
        artifact.url,
        state.sessions.active_sessions()
    );

    Ok(Json(StartResponse {
        text: turn.text.to_string(),
        audio_url: artifact.url,
        is_finished: turn.is_finished,
        session_id,
    }))
}

/// Run one spoken turn: store the upload, transcribe, judge, speak.
///
/// Turns on one session are serialised by the session lock. Once the story
/// is finished the upload is neither transcribed nor judged, `user_said` is
/// empty, and the cached "story is over" clip is returned. The scratch copy
/// of the upload is removed however the request ends.
pub async fn process_audio(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<SessionQuery>,
    mut multipart: Multipart,
) -> AppResult<Json<TurnResponse>> {
    let mut upload: Option<Bytes> = None;
    let mut field_session: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(AUDIO_FIELD) => {
                upload = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Upload(e.to_string()))?,
                );
            }
            Some(SESSION_FIELD) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Upload(e.to_string()))?;
                field_session = normalize(Some(&value), "form field");
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let upload =
        upload.ok_or_else(|| AppError::Upload(format!("missing multipart field '{AUDIO_FIELD}'")))?;

    let session_id = header_session_id(&headers)
        .or(field_session)
        .or_else(|| normalize(query.session_id.as_deref(), "query"))
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    let scratch = ScratchFile::create(&state.config.scratch_dir, &upload).await?;

    let shared = state.sessions.get_or_create(&session_id).await;
    let mut story = shared.lock().await;

    let already_finished = story.is_finished();
    let user_said = if already_finished {
        debug!("Session {} already finished, skipping transcription", session_id);
        String::new()
    } else {
        let audio = scratch.read().await?;
        info!(
            "Received {} bytes of audio for session {}",
            audio.len(),
            session_id
        );
        let transcript = state.stt.transcribe(audio).await?;
        info!("User said: {}", transcript);
        transcript
    };

    let turn = story
        .advance(Some(&user_said), state.judge.as_ref())
        .await?;
    drop(story);

    let artifact = if already_finished {
        story_over_audio(&state).await?
    } else {
        let artifact = speak(&state, turn.text).await?;
        if turn.is_finished {
            // Later turns on this story replay the cached clip.
            if let Err(e) = story_over_audio(&state).await {
                warn!("Could not prepare the story-over clip: {}", e);
            }
        }
        artifact
    };
    drop(scratch);

    Ok(Json(TurnResponse {
        user_said,
        text: turn.text.to_string(),
        audio_url: artifact.url,
        is_finished: turn.is_finished,
        session_id,
    }))
}
