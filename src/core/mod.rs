pub mod llm;
pub mod sessions;
pub mod storage;
pub mod story;
pub mod stt;
pub mod tts;

pub use llm::{BaseLLM, GroqLLM, LLMError};
pub use sessions::{DEFAULT_SESSION_ID, SessionStore};
pub use storage::{AudioArtifact, AudioStore};
pub use story::{KeywordJudge, LlmJudge, NarrativeOutcome, StoryJudge, StoryState};
pub use stt::{BaseSTT, DeepgramSTT, STTError};
pub use tts::{BaseTTS, EdgeTTS, TTSError};
