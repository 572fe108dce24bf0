use anyhow::{Context, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://mental_health.db?mode=rwc";
const DEFAULT_VERSE_CORPUS_PATH: &str = "data/verses.json";

/// Application configuration loaded from environment variables.
/// Every variable has a default except the LLM key, which is optional:
/// without it the guidance endpoint answers with an LLM error.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: Option<String>,
    pub verse_corpus_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            verse_corpus_path: env_or("VERSE_CORPUS_PATH", DEFAULT_VERSE_CORPUS_PATH),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Treats an empty variable the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
