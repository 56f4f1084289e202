// src/config/cli.rs
// Command-line flags. Each flag falls back to its environment variable.

use super::{DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT};
use crate::llm::DEFAULT_API_BASE;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "critique")]
#[command(about = "Brutally critical AI review of tickets, specs, and business ideas")]
#[command(version)]
pub struct Cli {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    /// Gemini API base URL (without the /{model}:generateContent suffix)
    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_API_BASE)]
    pub gemini_api_base: String,

    /// Address to bind
    #[arg(long, env = "CRITIQUE_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "CRITIQUE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}
