//! Client settings from environment.

use std::env;
use std::time::Duration;

use trip_core::{RetryPolicy, TripError};
use trip_upstream::{chat, ors, ChatClient, OrsClient};

#[derive(Debug, Clone)]
pub struct Settings {
    pub ors_api_key: Option<String>,
    pub ors_base_url: String,
    pub ors_timeout: Duration,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    pub llm_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Settings {
    pub fn from_env() -> Self {
        let attempts = env_parse("TRIP_GENERATION_ATTEMPTS").unwrap_or(3);
        let backoff_ms = env_parse("TRIP_GENERATION_BACKOFF_MS").unwrap_or(1000);
        Self {
            ors_api_key: env::var("ORS_API_KEY").ok(),
            ors_base_url: env::var("ORS_BASE_URL")
                .unwrap_or_else(|_| ors::DEFAULT_BASE_URL.to_string()),
            ors_timeout: Duration::from_secs(env_parse("ORS_TIMEOUT_S").unwrap_or(20)),
            groq_api_key: env::var("GROQ_API_KEY").ok(),
            groq_base_url: env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| chat::DEFAULT_BASE_URL.to_string()),
            groq_model: env::var("GROQ_MODEL").unwrap_or_else(|_| chat::DEFAULT_MODEL.to_string()),
            llm_timeout: Duration::from_secs(env_parse("LLM_TIMEOUT_S").unwrap_or(30)),
            retry: RetryPolicy::new(attempts as u32, Duration::from_millis(backoff_ms)),
        }
    }

    pub fn ors_client(&self) -> Result<OrsClient, TripError> {
        OrsClient::new(
            self.ors_base_url.clone(),
            self.ors_api_key.clone(),
            self.ors_timeout,
        )
    }

    pub fn chat_client(&self) -> Result<ChatClient, TripError> {
        ChatClient::new(
            self.groq_base_url.clone(),
            self.groq_api_key.clone(),
            self.groq_model.clone(),
            self.llm_timeout,
        )
    }
}

fn env_parse(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}
