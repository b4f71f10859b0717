//! Trip Upstream - external service clients
//!
//! Handles all communication with OpenRouteService (geocoding and directions)
//! and the OpenAI-compatible chat endpoint used for route narration.

pub mod chat;
pub mod ors;

pub use chat::ChatClient;
pub use ors::OrsClient;
