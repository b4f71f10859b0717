//! OpenAI-compatible chat-completions client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use trip_core::{TextGenerator, TripError};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// HTTP client for a chat-completions endpoint.
pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl ChatClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TripError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TripError::Configuration(format!("HTTP client: {}", err)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            model: model.into(),
            temperature: 0.7,
            max_tokens: 2000,
        })
    }

    /// Send a single user message and return the first choice's text.
    pub async fn chat(&self, prompt: &str) -> Result<String, TripError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TripError::Configuration("GROQ_API_KEY is required".to_string()))?;

        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| TripError::upstream(format!("chat request failed: {}", err)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TripError::upstream(format!(
                "chat request failed: {} {}",
                status, body
            )));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|err| TripError::upstream(format!("chat response: {}", err)))?;

        let content = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| TripError::upstream("No content received from chat service"))?;

        debug!("Chat model {} returned {} chars", self.model, content.len());
        Ok(content)
    }
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn complete(&self, prompt: &str) -> Result<String, TripError> {
        self.chat(prompt).await
    }
}
