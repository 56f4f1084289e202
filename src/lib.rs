// src/lib.rs
// critique - relays tickets and business ideas to Gemini for a harsh review

pub mod analysis;
pub mod config;
pub mod http;
pub mod llm;
pub mod server;

use std::sync::Arc;

use anyhow::Result;

use crate::analysis::ContentAnalyzer;
use crate::config::AnalyzerConfig;
use crate::llm::GeminiClient;
use crate::server::AppState;

/// Wire the production Gemini client into an analyzer and app state
pub fn build_state(config: AnalyzerConfig) -> Result<AppState> {
    let http = http::create_shared_client()?;
    let client = Arc::new(GeminiClient::with_api_base(http, config.api_base.clone()));
    Ok(AppState::new(ContentAnalyzer::new(config, client)))
}
