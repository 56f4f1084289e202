// src/config/mod.rs
// Process configuration - built once at startup, then passed by reference

mod cli;

pub use cli::Cli;

use crate::llm::DEFAULT_API_BASE;
use tracing::{info, warn};

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Model used when GEMINI_MODEL is not set
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Settings the content analyzer needs for each remote call
#[derive(Clone)]
pub struct AnalyzerConfig {
    /// Gemini API key. `None` means every analysis returns the missing-key result.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl AnalyzerConfig {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            model: model.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::new(None, DEFAULT_MODEL)
    }
}

// Hand-written so the key never lands in logs
impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port`; the host may be a name or an IP literal
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Complete process configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub analyzer: AnalyzerConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Log what was resolved (without exposing the key)
    pub fn log_status(&self) {
        if self.analyzer.has_api_key() {
            info!(model = %self.analyzer.model, "Gemini API key configured");
        } else {
            warn!("{} not set - every analysis will return the missing-key result", API_KEY_ENV);
        }
        if self.analyzer.api_base != DEFAULT_API_BASE {
            info!(api_base = %self.analyzer.api_base, "Using custom Gemini endpoint");
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            analyzer: AnalyzerConfig::new(cli.gemini_api_key, cli.gemini_model)
                .with_api_base(cli.gemini_api_base),
            server: ServerConfig {
                host: cli.host,
                port: cli.port,
            },
        }
    }
}
