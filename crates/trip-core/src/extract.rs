//! JSON object extraction from free-form model output.
//!
//! Models wrap JSON in prose or code fences, so extraction is an ordered list
//! of independent strategies; the first that yields an object wins.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::TripError;

/// A single extraction attempt over the raw model text.
pub type Strategy = fn(&str) -> Result<Value, TripError>;

/// Strategies in the order they are tried.
pub const STRATEGIES: [(&str, Strategy); 4] = [
    ("whole_text", parse_whole),
    ("brace_pattern", parse_brace_pattern),
    ("fenced_block", parse_fenced_block),
    ("brace_span", parse_brace_span),
];

fn brace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{[\s\S]*\}").expect("valid brace pattern"))
}

fn fenced_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"```json\s*(\{[\s\S]*?\})\s*```").expect("valid fenced pattern")
    })
}

fn parse_object(text: &str) -> Result<Value, TripError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(TripError::EnrichmentParse("JSON is not an object".to_string())),
        Err(err) => Err(TripError::EnrichmentParse(err.to_string())),
    }
}

/// Parse the entire text.
pub fn parse_whole(text: &str) -> Result<Value, TripError> {
    parse_object(text.trim())
}

/// Parse the first `{ ... }` match of a greedy brace pattern.
pub fn parse_brace_pattern(text: &str) -> Result<Value, TripError> {
    let found = brace_pattern()
        .find(text)
        .ok_or_else(|| TripError::EnrichmentParse("no brace block found".to_string()))?;
    parse_object(found.as_str())
}

/// Parse the contents of a fenced ```` ```json ```` code block.
pub fn parse_fenced_block(text: &str) -> Result<Value, TripError> {
    let inner = fenced_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| TripError::EnrichmentParse("no fenced JSON block found".to_string()))?;
    parse_object(inner.as_str())
}

/// Parse the substring between the first `{` and the last `}`.
pub fn parse_brace_span(text: &str) -> Result<Value, TripError> {
    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if last > first => parse_object(&text[first..=last]),
        _ => Err(TripError::EnrichmentParse(
            "no JSON object found in response".to_string(),
        )),
    }
}

/// Run every strategy in order and return the first JSON object found.
pub fn extract_json(text: &str) -> Result<Value, TripError> {
    let mut last_error = TripError::EnrichmentParse("empty response".to_string());
    for (name, strategy) in STRATEGIES {
        match strategy(text) {
            Ok(value) => {
                debug!("Extracted enrichment JSON with strategy '{}'", name);
                return Ok(value);
            }
            Err(err) => last_error = err,
        }
    }
    Err(last_error)
}
