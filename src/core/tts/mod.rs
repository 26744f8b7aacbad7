mod base;
pub mod edge;

pub use base::{BaseTTS, TTSError, TTSResult};
pub use edge::{EDGE_TTS_URL, EdgeTTS, EdgeTTSConfig};
