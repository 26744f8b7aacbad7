mod base;
pub mod deepgram;

// Re-export public types and traits
pub use base::{BaseSTT, STTError, TRANSCRIPT_SENTINEL};

// Re-export Deepgram implementation
pub use deepgram::{DEEPGRAM_LISTEN_URL, DeepgramSTT, DeepgramSTTConfig};
