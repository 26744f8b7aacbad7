//! Groq chat completions client.
//!
//! Groq exposes an OpenAI-compatible `/openai/v1/chat/completions` endpoint.
//! The story judge sends one user message and reads
//! `choices[0].message.content` from the reply.
//!
//! ```bash
//! export GROQ_API_KEY="gsk_..."
//! ```

mod client;
pub mod config;
pub mod messages;


pub use client::GroqLLM;
pub use config::{DEFAULT_CHAT_MODEL, GROQ_CHAT_URL, GroqChatConfig};
pub use messages::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
