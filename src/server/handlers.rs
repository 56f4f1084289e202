// src/server/handlers.rs
// Request handlers: analyze and health

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::{Map, Value, json};
use tracing::{error, info, warn};

use super::AppState;
use super::error::{ApiError, ApiResult};
use crate::analysis::{AnalysisRequest, ModelReply};

/// `POST /api/analyze`
///
/// Missing fields take their defaults. The analyzer's text is relayed
/// verbatim when it is a JSON object; anything else is a 500.
pub async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Map<String, Value>>> {
    let Json(body) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected analyze request body");
        ApiError::custom(rejection.status(), rejection.body_text())
    })?;

    // Structs also deserialize from arrays; only objects are accepted here
    if !body.is_object() {
        warn!("Analyze request body is not a JSON object");
        return Err(ApiError::bad_request("Request body must be a JSON object"));
    }

    let request: AnalysisRequest = serde_json::from_value(body).map_err(|e| {
        warn!(error = %e, "Invalid analyze request fields");
        ApiError::bad_request(format!("Invalid request body: {}", e))
    })?;

    info!(
        mode = %request.analysis_mode,
        text_length = request.content_text.chars().count(),
        "API request"
    );

    let raw = state
        .analyzer
        .analyze(
            &request.content_text,
            request.analysis_mode,
            &request.criteria_data,
        )
        .await;

    match ModelReply::parse(raw) {
        ModelReply::Parsed(result) => {
            info!(
                score = %display_field(&result, "score"),
                risk = %display_field(&result, "risk_level"),
                "Analysis complete"
            );
            Ok(Json(result))
        }
        ModelReply::Raw { text, reason } => {
            error!(
                reason = %reason,
                response_length = text.chars().count(),
                "Failed to parse AI response as JSON"
            );
            Err(ApiError::unformatted_reply())
        }
    }
}

/// `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let config = state.analyzer.config();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "model": config.model,
        "api_key_configured": config.has_api_key(),
    }))
}

/// Log-friendly rendering of a reply field, `N/A` when absent
fn display_field(result: &Map<String, Value>, key: &str) -> String {
    match result.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "N/A".to_string(),
    }
}
