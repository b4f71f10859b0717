//! Server configuration from environment.

use std::env;
use std::time::Duration;

use trip_upstream::{chat, ors};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub ors_api_key: Option<String>,
    pub ors_base_url: String,
    pub ors_timeout: Duration,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    pub llm_timeout: Duration,
    /// Whole-generation attempts for `/api/generate-route`.
    pub generation_attempts: u32,
    /// Linear step between generation attempts.
    pub generation_backoff: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("TRIP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5001),
            ors_api_key: optional_var("ORS_API_KEY"),
            ors_base_url: env::var("ORS_BASE_URL")
                .unwrap_or_else(|_| ors::DEFAULT_BASE_URL.to_string()),
            ors_timeout: Duration::from_secs(
                env::var("ORS_TIMEOUT_S")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(20),
            ),
            groq_api_key: optional_var("GROQ_API_KEY"),
            groq_base_url: env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| chat::DEFAULT_BASE_URL.to_string()),
            groq_model: env::var("GROQ_MODEL")
                .unwrap_or_else(|_| chat::DEFAULT_MODEL.to_string()),
            llm_timeout: Duration::from_secs(
                env::var("LLM_TIMEOUT_S")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            generation_attempts: env::var("TRIP_GENERATION_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|attempts| *attempts > 0)
                .unwrap_or(3),
            generation_backoff: Duration::from_millis(
                env::var("TRIP_GENERATION_BACKOFF_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1000),
            ),
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
