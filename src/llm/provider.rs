// src/llm/provider.rs
// LLM client abstraction: one prompt in, one reply text out

use anyhow::Result;
use async_trait::async_trait;

/// A single generation call
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    pub prompt: &'a str,
    /// Ask the provider to format the reply as JSON
    pub json_output: bool,
}

/// Trait for remote model clients.
///
/// Implementations make exactly one attempt per call. The reply text is
/// returned untouched; callers decide what to do with it.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Provider name for logging
    fn provider_name(&self) -> &'static str;

    async fn generate(&self, request: GenerateRequest<'_>) -> Result<String>;
}
