//! LLM provider dialects

pub mod openai;

// Re-export for convenience
pub use openai::{ChatMessage, parse_chat_completion};
