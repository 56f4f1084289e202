// src/llm/gemini/mod.rs
// Google Gemini API client

mod client;
mod types;

pub use client::{GeminiClient, DEFAULT_API_BASE};
