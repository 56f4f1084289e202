// src/analysis/mod.rs
// Analysis request/result types shared by the analyzer and the HTTP layer

pub mod analyzer;
pub mod prompt;

pub use analyzer::ContentAnalyzer;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Default name for criteria submitted without one
pub const DEFAULT_CRITERION_NAME: &str = "Unknown Criterion";

/// Default priority for criteria submitted without one
pub const DEFAULT_CRITERION_PRIORITY: &str = "Normal";

// ============================================================================
// Mode
// ============================================================================

/// Which persona and template an analysis uses.
///
/// Only the literal `"ticket"` selects [`AnalysisMode::Ticket`]. Every other
/// value, including unknown strings, `null` and non-strings, falls back to
/// [`AnalysisMode::Business`]. An absent mode is `Ticket`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Ticket,
    Business,
}

impl AnalysisMode {
    /// Map a raw mode string onto a mode. Never fails.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "ticket" => Self::Ticket,
            _ => Self::Business,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ticket => "ticket",
            Self::Business => "business",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AnalysisMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only called when the field is present; absence takes the default
        match Value::deserialize(deserializer)? {
            Value::String(raw) => Ok(Self::from_raw(&raw)),
            _ => Ok(Self::Business),
        }
    }
}

// ============================================================================
// Request
// ============================================================================

/// A user-defined evaluation dimension (business mode only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    #[serde(default = "default_criterion_name")]
    pub name: String,
    #[serde(default = "default_criterion_priority")]
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_criterion_name() -> String {
    DEFAULT_CRITERION_NAME.to_string()
}

fn default_criterion_priority() -> String {
    DEFAULT_CRITERION_PRIORITY.to_string()
}

impl Criterion {
    pub fn new(name: impl Into<String>, priority: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: priority.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description, treating an empty string as absent
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Body of `POST /api/analyze`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    pub content_text: String,
    pub analysis_mode: AnalysisMode,
    #[serde(deserialize_with = "null_as_empty")]
    pub criteria_data: Vec<Criterion>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Criterion>, D::Error> {
    Ok(Option::<Vec<Criterion>>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Result
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    Error,
}

/// The critique shape the model is asked to produce.
///
/// Remote replies are relayed as-is and never deserialized into this type;
/// it is only built locally for failure payloads and in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: i64,
    pub risk_level: RiskLevel,
    pub critiques: Vec<String>,
    pub blind_spots: Vec<String>,
}

impl AnalysisResult {
    pub fn to_json(&self) -> String {
        // Plain strings and integers only; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Why the analyzer could not get a reply from the model
#[derive(Error, Debug)]
pub enum AnalysisFailure {
    #[error("{env_var} not configured")]
    MissingApiKey { env_var: &'static str },

    #[error("Error calling Gemini API: {0}")]
    Remote(String),
}

impl AnalysisFailure {
    /// Render the failure in the same wire shape as a model reply
    pub fn into_result(self) -> AnalysisResult {
        match self {
            Self::MissingApiKey { env_var } => AnalysisResult {
                score: 0,
                risk_level: RiskLevel::Error,
                critiques: vec!["API Key Missing".to_string()],
                blind_spots: vec![format!("Please add {} to your configuration", env_var)],
            },
            Self::Remote(_) => AnalysisResult {
                score: 0,
                risk_level: RiskLevel::Error,
                critiques: vec![self.to_string()],
                blind_spots: vec!["Check your API key and connection.".to_string()],
            },
        }
    }
}

// ============================================================================
// Model reply
// ============================================================================

/// Analyzer output as seen by the HTTP layer
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// Text parsed as a JSON object
    Parsed(Map<String, Value>),
    /// Anything else, with the reason it was rejected
    Raw { text: String, reason: String },
}

impl ModelReply {
    pub fn parse(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Self::Parsed(map),
            Ok(other) => Self::Raw {
                reason: format!("expected a JSON object, got {}", json_kind(&other)),
                text,
            },
            Err(e) => Self::Raw {
                reason: e.to_string(),
                text,
            },
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_fallback_policy() {
        assert_eq!(AnalysisMode::from_raw("ticket"), AnalysisMode::Ticket);
        assert_eq!(AnalysisMode::from_raw("business"), AnalysisMode::Business);
        assert_eq!(AnalysisMode::from_raw("Ticket"), AnalysisMode::Business);
        assert_eq!(AnalysisMode::from_raw(""), AnalysisMode::Business);
        assert_eq!(AnalysisMode::from_raw("haiku"), AnalysisMode::Business);
    }

    #[test]
    fn test_request_defaults() {
        let req: AnalysisRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.content_text, "");
        assert_eq!(req.analysis_mode, AnalysisMode::Ticket);
        assert!(req.criteria_data.is_empty());
    }

    #[test]
    fn test_request_non_string_mode_is_business() {
        for mode in [json!(null), json!(2), json!(true), json!(["ticket"])] {
            let req: AnalysisRequest =
                serde_json::from_value(json!({"analysis_mode": mode})).unwrap();
            assert_eq!(req.analysis_mode, AnalysisMode::Business, "mode {}", mode);
        }
    }

    #[test]
    fn test_request_null_criteria_is_empty() {
        let req: AnalysisRequest = serde_json::from_value(json!({
            "analysis_mode": "business",
            "criteria_data": null
        }))
        .unwrap();
        assert!(req.criteria_data.is_empty());
    }

    #[test]
    fn test_request_unknown_mode_is_business() {
        let req: AnalysisRequest =
            serde_json::from_value(json!({"analysis_mode": "startup"})).unwrap();
        assert_eq!(req.analysis_mode, AnalysisMode::Business);
    }

    #[test]
    fn test_criterion_defaults() {
        let req: AnalysisRequest = serde_json::from_value(json!({
            "criteria_data": [{}, {"name": "Scalability"}, {"priority": "Low"}]
        }))
        .unwrap();

        let names: Vec<_> = req.criteria_data.iter().map(|c| c.name.as_str()).collect();
        let priorities: Vec<_> = req.criteria_data.iter().map(|c| c.priority.as_str()).collect();
        assert_eq!(names, ["Unknown Criterion", "Scalability", "Unknown Criterion"]);
        assert_eq!(priorities, ["Normal", "Normal", "Low"]);
    }

    #[test]
    fn test_empty_description_is_absent() {
        let c = Criterion::new("Market Fit", "Critical").with_description("");
        assert_eq!(c.description(), None);

        let c = Criterion::new("Market Fit", "Critical").with_description("fits");
        assert_eq!(c.description(), Some("fits"));
    }

    #[test]
    fn test_missing_key_payload() {
        let result = AnalysisFailure::MissingApiKey { env_var: "GEMINI_API_KEY" }.into_result();
        let value: Value = serde_json::from_str(&result.to_json()).unwrap();
        assert_eq!(value["score"], 0);
        assert_eq!(value["risk_level"], "Error");
        assert_eq!(value["critiques"], json!(["API Key Missing"]));
        assert_eq!(
            value["blind_spots"],
            json!(["Please add GEMINI_API_KEY to your configuration"])
        );
    }

    #[test]
    fn test_remote_failure_payload() {
        let result = AnalysisFailure::Remote("connection refused".to_string()).into_result();
        assert_eq!(result.score, 0);
        assert_eq!(result.risk_level, RiskLevel::Error);
        assert_eq!(result.critiques, ["Error calling Gemini API: connection refused"]);
        assert_eq!(result.blind_spots, ["Check your API key and connection."]);
    }

    #[test]
    fn test_model_reply_object() {
        let reply = ModelReply::parse(r#"{"score": 85, "risk_level": "Medium"}"#.to_string());
        match reply {
            ModelReply::Parsed(map) => {
                assert_eq!(map["score"], 85);
                assert_eq!(map["risk_level"], "Medium");
            }
            other => panic!("expected parsed reply, got {:?}", other),
        }
    }

    #[test]
    fn test_model_reply_keeps_key_order() {
        let reply = ModelReply::parse(r#"{"z": 1, "a": 2, "m": 3}"#.to_string());
        let ModelReply::Parsed(map) = reply else {
            panic!("expected parsed reply");
        };
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_model_reply_raw() {
        assert!(matches!(
            ModelReply::parse("Invalid JSON response".to_string()),
            ModelReply::Raw { .. }
        ));
        match ModelReply::parse("[1, 2]".to_string()) {
            ModelReply::Raw { reason, .. } => assert!(reason.contains("array")),
            other => panic!("expected raw reply, got {:?}", other),
        }
    }
}
