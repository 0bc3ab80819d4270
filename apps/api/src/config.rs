use std::time::Duration;

use anyhow::{Context, Result};

/// Gateway configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the rendering backend. Empty means same-origin relative paths.
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_url: std::env::var("BACKEND_URL").unwrap_or_default(),
            backend_timeout: Duration::from_secs(
                std::env::var("BACKEND_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .context("BACKEND_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
