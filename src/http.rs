// src/http.rs
// Shared HTTP client for outbound model calls

use anyhow::{Context, Result};
use std::time::Duration;

/// Connect timeout. Request duration is left to the transport default.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the shared HTTP client.
///
/// Built once at startup and handed to the model client. Uses connection
/// pooling internally.
pub fn create_shared_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(10)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")
}
