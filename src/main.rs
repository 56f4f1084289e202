// src/main.rs
// critique HTTP server entry point

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use critique::config::{Cli, Config};

/// Used when RUST_LOG is unset. Transport crates are kept quiet.
const DEFAULT_LOG_FILTER: &str = "info,hyper=warn,hyper_util=warn,reqwest=warn";

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence
    let _ = dotenvy::dotenv();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();

    let config = Config::from(Cli::parse());
    info!("Starting critique v{}", env!("CARGO_PKG_VERSION"));
    config.log_status();

    let state = critique::build_state(config.analyzer.clone())?;
    critique::server::run(&config.server, state).await
}
