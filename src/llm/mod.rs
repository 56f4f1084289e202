// src/llm/mod.rs
// Remote language-model clients

mod gemini;
mod provider;

pub use gemini::{GeminiClient, DEFAULT_API_BASE};
pub use provider::{GenerateRequest, LlmClient};
