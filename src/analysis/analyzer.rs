// src/analysis/analyzer.rs
// Content analyzer: prompt selection, one model call, failure shaping

use std::sync::Arc;
use std::time::Instant;

use tracing::{Span, debug, error, info, instrument};
use uuid::Uuid;

use super::prompt::build_prompt;
use super::{AnalysisFailure, AnalysisMode, Criterion};
use crate::config::{API_KEY_ENV, AnalyzerConfig};
use crate::llm::{GenerateRequest, LlmClient};

/// Characters of the model reply echoed at debug level
const PREVIEW_CHARS: usize = 200;

/// Turns user text into a critique by way of the remote model.
///
/// [`ContentAnalyzer::analyze`] never fails: a missing key or a failed call
/// comes back as an error-shaped result in the same JSON form a model reply
/// would take.
pub struct ContentAnalyzer {
    config: AnalyzerConfig,
    client: Arc<dyn LlmClient>,
}

impl ContentAnalyzer {
    pub fn new(config: AnalyzerConfig, client: Arc<dyn LlmClient>) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze `text` and return the model's raw reply, or a synthesized
    /// error result as a JSON string.
    #[instrument(skip_all, fields(request_id, mode = %mode))]
    pub async fn analyze(&self, text: &str, mode: AnalysisMode, criteria: &[Criterion]) -> String {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        info!(
            text_length = text.chars().count(),
            criteria_count = criteria.len(),
            "Starting analysis"
        );

        match self.try_analyze(text, mode, criteria).await {
            Ok(reply) => reply,
            Err(failure) => {
                error!(error = %failure, "Analysis failed");
                failure.into_result().to_json()
            }
        }
    }

    async fn try_analyze(
        &self,
        text: &str,
        mode: AnalysisMode,
        criteria: &[Criterion],
    ) -> Result<String, AnalysisFailure> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AnalysisFailure::MissingApiKey { env_var: API_KEY_ENV })?;

        let prompt = build_prompt(mode, text, criteria);
        debug!(
            model = %self.config.model,
            prompt_length = prompt.chars().count(),
            "Prompt built"
        );

        info!(provider = self.client.provider_name(), "Calling model");
        let start = Instant::now();

        let reply = self
            .client
            .generate(GenerateRequest {
                api_key,
                model: &self.config.model,
                prompt: &prompt,
                json_output: true,
            })
            .await
            .map_err(|e| AnalysisFailure::Remote(format!("{:#}", e)))?;

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            response_length = reply.chars().count(),
            "Model response received"
        );
        debug!(preview = %preview(&reply), "Response preview");

        Ok(reply)
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Records each call and answers with a canned reply
    struct MockClient {
        reply: Result<String, String>,
        calls: Mutex<Vec<(String, String, String, bool)>>,
    }

    impl MockClient {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, String, String, bool)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for MockClient {
        fn provider_name(&self) -> &'static str {
            "Mock"
        }

        async fn generate(&self, request: GenerateRequest<'_>) -> anyhow::Result<String> {
            self.calls.lock().unwrap().push((
                request.api_key.to_string(),
                request.model.to_string(),
                request.prompt.to_string(),
                request.json_output,
            ));
            self.reply.clone().map_err(|m| anyhow::anyhow!(m))
        }
    }

    fn keyed_config() -> AnalyzerConfig {
        AnalyzerConfig::new(Some("test_api_key".to_string()), "gemini-1.5-flash")
    }

    const REPLY: &str = r#"{"score": 85, "risk_level": "Medium", "critiques": ["Test critique"], "blind_spots": ["Test blind spot"]}"#;

    #[tokio::test]
    async fn test_ticket_mode_returns_raw_reply() {
        let client = MockClient::replying(REPLY);
        let analyzer = ContentAnalyzer::new(keyed_config(), client.clone());

        let result = analyzer
            .analyze("Test ticket content", AnalysisMode::Ticket, &[])
            .await;

        assert_eq!(result, REPLY);
        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        let (api_key, model, prompt, json_output) = &calls[0];
        assert_eq!(api_key, "test_api_key");
        assert_eq!(model, "gemini-1.5-flash");
        assert!(prompt.contains("Senior QA Engineer"));
        assert!(prompt.contains("Test ticket content"));
        assert!(*json_output);
    }

    #[tokio::test]
    async fn test_business_mode_uses_criteria() {
        let client = MockClient::replying(REPLY);
        let analyzer = ContentAnalyzer::new(keyed_config(), client.clone());
        let criteria = vec![Criterion::new("Market Fit", "Critical")];

        analyzer
            .analyze("Test business idea", AnalysisMode::Business, &criteria)
            .await;

        let calls = client.calls();
        let (_, _, prompt, _) = &calls[0];
        assert!(prompt.contains("Venture Capitalist"));
        assert!(prompt.contains("- **Market Fit** (Importance: Critical)"));
    }

    #[tokio::test]
    async fn test_reply_is_not_validated() {
        let client = MockClient::replying("not json at all");
        let analyzer = ContentAnalyzer::new(keyed_config(), client);

        let result = analyzer.analyze("x", AnalysisMode::Ticket, &[]).await;
        assert_eq!(result, "not json at all");
    }

    #[tokio::test]
    async fn test_missing_api_key_skips_remote_call() {
        let client = MockClient::replying(REPLY);
        let analyzer = ContentAnalyzer::new(AnalyzerConfig::default(), client.clone());

        for mode in [AnalysisMode::Ticket, AnalysisMode::Business] {
            let result = analyzer.analyze("Test content", mode, &[]).await;
            let value: Value = serde_json::from_str(&result).unwrap();
            assert_eq!(value["score"], 0);
            assert_eq!(value["risk_level"], "Error");
            assert_eq!(value["critiques"], json!(["API Key Missing"]));
            assert_eq!(
                value["blind_spots"],
                json!(["Please add GEMINI_API_KEY to your configuration"])
            );
        }

        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_remote_error_is_shaped() {
        let client = MockClient::failing("API Error");
        let analyzer = ContentAnalyzer::new(keyed_config(), client.clone());

        let result = analyzer.analyze("Test content", AnalysisMode::Ticket, &[]).await;
        let value: Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["score"], 0);
        assert_eq!(value["risk_level"], "Error");
        let critique = value["critiques"][0].as_str().unwrap();
        assert!(critique.contains("Error calling Gemini API"));
        assert!(critique.contains("API Error"));
        assert_eq!(value["blind_spots"], json!(["Check your API key and connection."]));
        assert_eq!(client.calls().len(), 1);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(300);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }
}
