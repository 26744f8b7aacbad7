mod base;
pub mod groq;

pub use base::{BaseLLM, LLMError};
pub use groq::{GROQ_CHAT_URL, GroqChatConfig, GroqLLM};
