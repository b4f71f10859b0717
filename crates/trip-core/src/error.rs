//! Error taxonomy shared by route generation and enrichment.

use thiserror::Error;

/// Errors raised while generating or enriching a trip route.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TripError {
    /// Malformed caller input, rejected before any network call.
    #[error("invalid request: {0}")]
    Validation(String),
    /// A required service credential is missing.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The geocoding service returned no result for the place name.
    #[error("location not found: {0}")]
    LocationNotFound(String),
    /// Non-recoverable failure reported by an external service.
    #[error("upstream service failed: {0}")]
    UpstreamService(String),
    /// The candidate search space was exhausted.
    #[error("{0}")]
    RouteNotFound(String),
    /// No extraction strategy produced a JSON object.
    #[error("invalid JSON response from text service: {0}")]
    EnrichmentParse(String),
}

impl TripError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamService(message.into())
    }

    /// Whether a whole-generation retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}
