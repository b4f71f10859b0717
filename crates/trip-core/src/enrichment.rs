//! Route narration: schema, normalization and the never-failing enrichment call.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::TripError;
use crate::extract::extract_json;
use crate::models::{is_single_day, Coordinate, RouteResult};
use crate::prompt::build_prompt;
use crate::routing::TextGenerator;

/// Structured travel guide for a generated route.
///
/// Every field is normalized on deserialization: wrong types become their
/// default and list entries that don't match the schema are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub overview: String,
    #[serde(rename = "bestWindows", default, deserialize_with = "lenient_list")]
    pub best_windows: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub segments: Vec<Segment>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub pois: Vec<Poi>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub safety_tips: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub gear_checklist: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub food_stops: Vec<FoodStop>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub photo_spots: Vec<PhotoSpot>,
}

/// One day (bike) or the whole outing (hike).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_list", skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_opt", skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodStop {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoSpot {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub best_time: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => value,
        _ => String::new(),
    })
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

fn collect_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => collect_items(items),
        _ => Vec::new(),
    })
}

fn lenient_opt_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(collect_items(items)),
        _ => None,
    })
}

impl Enrichment {
    /// Normalize an extracted JSON object against the schema.
    pub fn from_value(value: Value) -> Result<Self, TripError> {
        serde_json::from_value(value).map_err(|err| TripError::EnrichmentParse(err.to_string()))
    }

    /// Template returned whenever narration is unavailable.
    pub fn fallback(destination: &str, trip_type: &str) -> Self {
        Self {
            title: fallback_title(destination, trip_type),
            overview: fallback_overview(destination, trip_type),
            ..Self::default()
        }
    }

    /// Fill a missing title or overview from the template.
    pub fn with_fallbacks(mut self, destination: &str, trip_type: &str) -> Self {
        if self.title.trim().is_empty() {
            self.title = fallback_title(destination, trip_type);
        }
        if self.overview.trim().is_empty() {
            self.overview = fallback_overview(destination, trip_type);
        }
        self
    }
}

fn fallback_title(destination: &str, trip_type: &str) -> String {
    format!("{} {} route", destination, trip_type)
}

fn fallback_overview(destination: &str, trip_type: &str) -> String {
    format!(
        "A {} route in {}. Enjoy your adventure!",
        trip_type, destination
    )
}

/// Segments the narration may contain: one for a hike or trek, one per day
/// for anything else.
pub fn expected_segment_count(trip_type: &str, route: &RouteResult) -> usize {
    if is_single_day(trip_type) {
        1
    } else {
        route.path_days.len().max(1)
    }
}

/// Extract and normalize an enrichment from raw model text.
///
/// `segments` is truncated to `expected_segments`, never padded.
pub fn parse(raw: &str, expected_segments: usize) -> Result<Enrichment, TripError> {
    let value = extract_json(raw)?;
    let mut enrichment = Enrichment::from_value(value)?;
    enrichment.segments.truncate(expected_segments);
    Ok(enrichment)
}

/// Narrate `route` with the text generator.
///
/// `trip_type` is the caller's label and is used verbatim in the prompt and
/// the fallback text; unknown labels are narrated per day.
///
/// Never fails: a missing credential, a service error or unparsable output
/// all degrade to [`Enrichment::fallback`].
pub async fn enrich_route<T>(
    generator: &T,
    destination: &str,
    trip_type: &str,
    route: &RouteResult,
    weather: Option<&Value>,
) -> Enrichment
where
    T: TextGenerator + ?Sized,
{
    let prompt = build_prompt(destination, trip_type, route, weather);
    let expected = expected_segment_count(trip_type, route);

    let outcome = match generator.complete(&prompt).await {
        Ok(raw) => parse(&raw, expected),
        Err(err) => Err(err),
    };

    match outcome {
        Ok(enrichment) => {
            info!(
                "Enriched {} route for '{}' ({} segment(s))",
                trip_type,
                destination,
                enrichment.segments.len()
            );
            enrichment.with_fallbacks(destination, trip_type)
        }
        Err(err) => {
            warn!("Enrichment for '{}' fell back to template: {}", destination, err);
            Enrichment::fallback(destination, trip_type)
        }
    }
}
