//! Deepgram pre-recorded Speech-to-Text provider.
//!
//! Sends a complete recording to Deepgram's `/v1/listen` REST endpoint in a
//! single authenticated POST and extracts the top transcript alternative.
//!
//! # Request
//!
//! ```text
//! POST https://api.deepgram.com/v1/listen?model=nova-2&smart_format=true&language=en-IN
//! Authorization: Token <DEEPGRAM_API_KEY>
//! Content-Type: audio/*
//! ```
//!
//! The body is passed through untouched; Deepgram sniffs the container
//! (WebM/Opus from browsers, WAV, MP3, ...).
//!
//! # Soft degradation
//!
//! A successful response that lacks `results.channels[0].alternatives[0].transcript`,
//! or whose transcript is blank, yields the sentinel `"..."` so the story can
//! continue down its "unrecognized" branch. Network failures and non-2xx statuses
//! are returned as [`STTError`](super::STTError).

mod client;
pub mod config;
pub mod messages;


pub use client::DeepgramSTT;
pub use config::{DEEPGRAM_LISTEN_URL, DeepgramSTTConfig};
pub use messages::{Alternative, Channel, DeepgramErrorResponse, DeepgramResponse, ListenResults};
