// src/llm/gemini/client.rs
// Google Gemini generateContent client (non-streaming, single attempt)

use crate::llm::gemini::types::{GeminiContent, GeminiRequest, GeminiResponse, GenerationConfig};
use crate::llm::provider::{GenerateRequest, LlmClient};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tracing::debug;

/// Public Gemini endpoint, without the `/{model}:generateContent` suffix
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Header carrying the API key. Keeps the key out of URLs and error text.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini API client
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_api_base(http, DEFAULT_API_BASE)
    }

    /// Point the client at a different endpoint (proxies, local stubs)
    pub fn with_api_base(http: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.api_base, model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn provider_name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate(&self, request: GenerateRequest<'_>) -> Result<String> {
        let body = GeminiRequest {
            contents: vec![GeminiContent::user_text(request.prompt)],
            generation_config: request.json_output.then(GenerationConfig::json),
        };

        let url = self.endpoint(request.model);
        debug!(url = %url, prompt_len = request.prompt.len(), "Sending Gemini request");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow!(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error: {} - {}", status, error_body));
        }

        let data: GeminiResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse Gemini response: {}", e.without_url()))?;

        if let Some(error) = data.error {
            return Err(anyhow!("Gemini error: {}", error.message));
        }

        data.text()
            .ok_or_else(|| anyhow!("Gemini response contained no text"))
    }
}
