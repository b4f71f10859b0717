//! Shared application state: service clients and the retry policy.

use std::sync::Arc;

use trip_core::{Geocoder, RetryPolicy, RouteProvider, TextGenerator, TripError};
use trip_upstream::{ChatClient, OrsClient};

use crate::config::Config;

pub struct AppState {
    pub geocoder: Arc<dyn Geocoder>,
    pub router: Arc<dyn RouteProvider>,
    pub narrator: Arc<dyn TextGenerator>,
    pub retry: RetryPolicy,
}

impl AppState {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn RouteProvider>,
        narrator: Arc<dyn TextGenerator>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            geocoder,
            router,
            narrator,
            retry,
        }
    }

    /// Wire the real upstream clients. Missing API keys are not fatal here;
    /// the affected endpoints report a configuration error per request.
    pub fn from_config(config: &Config) -> Result<Self, TripError> {
        let ors = Arc::new(OrsClient::new(
            config.ors_base_url.clone(),
            config.ors_api_key.clone(),
            config.ors_timeout,
        )?);
        let chat = Arc::new(ChatClient::new(
            config.groq_base_url.clone(),
            config.groq_api_key.clone(),
            config.groq_model.clone(),
            config.llm_timeout,
        )?);

        if config.ors_api_key.is_none() {
            tracing::warn!("ORS_API_KEY is not set; geocoding and routing will fail");
        }
        if config.groq_api_key.is_none() {
            tracing::warn!("GROQ_API_KEY is not set; enrichment will use fallback text");
        }

        Ok(Self::new(
            ors.clone(),
            ors,
            chat,
            RetryPolicy::new(config.generation_attempts, config.generation_backoff),
        ))
    }
}
