use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// Application configuration loaded from environment variables.
/// Everything has a default; only malformed values are rejected.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON reference tables to load instead of the bundled set.
    pub reference_tables_path: Option<PathBuf>,
    pub max_batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            reference_tables_path: None,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let max_batch_size = match var("MAX_BATCH_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("MAX_BATCH_SIZE must be a positive integer, got '{raw}'"))?,
            None => DEFAULT_MAX_BATCH_SIZE,
        };

        Ok(Config {
            port,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            reference_tables_path: var("REFERENCE_TABLES_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            max_batch_size,
        })
    }
}
