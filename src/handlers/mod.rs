//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `story` - Story session start and audio turns

pub mod api;
pub mod story;

pub use story::{process_audio, start_session};
