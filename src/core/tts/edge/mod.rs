//! Microsoft Edge "read aloud" speech synthesis.
//!
//! The read-aloud service speaks a small WebSocket protocol:
//!
//! ```text
//! client                                   service
//!   | -- text  Path:speech.config ------------> |
//!   | -- text  Path:ssml ---------------------> |
//!   | <------------ text  Path:turn.start ----- |
//!   | <------------ binary Path:audio (xN) ---- |
//!   | <------------ text  Path:turn.end ------- |
//! ```
//!
//! Binary frames carry a two byte big-endian header length, the header
//! lines, then raw MP3 bytes. No API key is needed; the connection is
//! authorised with the public trusted client token and a `Sec-MS-GEC`
//! token derived from the current time.

pub mod config;
pub mod messages;
mod provider;

#[cfg(test)]
mod tests;

pub use config::{EDGE_TTS_URL, EdgeTTSConfig, OUTPUT_FORMAT, TRUSTED_CLIENT_TOKEN};
pub use messages::{ServerFrame, escape_xml, sec_ms_gec};
pub use provider::EdgeTTS;
