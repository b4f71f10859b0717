//! OpenRouteService HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};
use trip_core::backoff::Backoff;
use trip_core::polyline;
use trip_core::{Coordinate, Geocoder, Path, RouteProvider, RouteRequest, TripError};

pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";
/// Additional attempts after the first for 429/5xx responses.
pub const MAX_RETRIES: u32 = 2;

/// Client for the OpenRouteService geocoding and directions APIs.
pub struct OrsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    retry: Backoff,
}

impl OrsClient {
    /// Create a client. A blank `api_key` is treated as missing; calls then
    /// fail with [`TripError::Configuration`].
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
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
            retry: Backoff::exponential(Duration::from_secs(1), Duration::from_secs(5)),
        })
    }

    /// Override the delay schedule between retried routing calls.
    pub fn with_retry_backoff(mut self, retry: Backoff) -> Self {
        self.retry = retry;
        self
    }

    fn api_key(&self) -> Result<&str, TripError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| TripError::Configuration("ORS_API_KEY is required".to_string()))
    }

    /// Resolve a place name to the first geocoding match.
    pub async fn geocode(&self, place: &str) -> Result<Coordinate, TripError> {
        let api_key = self.api_key()?;
        let url = format!("{}/geocode/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", api_key), ("text", place)])
            .send()
            .await
            .map_err(|err| TripError::upstream(format!("geocoding request failed: {}", err)))?;

        let status = response.status();
        if !status.is_success() {
            let payload: Value = response.json().await.unwrap_or(Value::Null);
            return Err(TripError::upstream(format!(
                "geocoding request failed: {} {}",
                status,
                error_message(&payload)
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| TripError::upstream(format!("geocoding response: {}", err)))?;

        first_feature_coordinate(&payload)
            .ok_or_else(|| TripError::LocationNotFound(place.to_string()))
    }

    /// Request a route, retrying 429/5xx with exponential backoff.
    pub async fn directions(&self, request: &RouteRequest) -> Result<Path, TripError> {
        let api_key = self.api_key()?;
        let url = format!("{}/v2/directions/{}", self.base_url, request.profile);
        let body = directions_body(request);

        let mut attempt = 1u32;
        loop {
            let response = self
                .client
                .post(&url)
                .header("Authorization", api_key)
                .json(&body)
                .send()
                .await
                .map_err(|err| {
                    TripError::upstream(format!("OpenRouteService request failed: {}", err))
                })?;

            let status = response.status();
            if status.is_success() {
                let payload: Value = response.json().await.map_err(|err| {
                    TripError::upstream(format!("OpenRouteService response: {}", err))
                })?;
                let path = extract_geometry(&payload)?;
                debug!("Route {} returned {} points", request.profile, path.len());
                return Ok(path);
            }

            let payload: Value = response.json().await.unwrap_or(Value::Null);
            if is_retryable(status) && attempt <= MAX_RETRIES {
                let delay = self.retry.delay(attempt);
                warn!(
                    "OpenRouteService HTTP {}, retrying in {:?} (attempt {}/{})",
                    status,
                    delay,
                    attempt + 1,
                    MAX_RETRIES + 1
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(TripError::upstream(format!(
                "OpenRouteService request failed: {} {}",
                status,
                error_message(&payload)
            )));
        }
    }
}

#[async_trait]
impl Geocoder for OrsClient {
    async fn resolve(&self, place: &str) -> Result<Coordinate, TripError> {
        self.geocode(place).await
    }
}

#[async_trait]
impl RouteProvider for OrsClient {
    async fn fetch_route(&self, request: &RouteRequest) -> Result<Path, TripError> {
        self.directions(request).await
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn directions_body(request: &RouteRequest) -> Value {
    let coordinates: Vec<[f64; 2]> = request
        .coordinates()
        .into_iter()
        .map(<[f64; 2]>::from)
        .collect();
    match request.round_trip {
        Some(round_trip) => json!({
            "coordinates": coordinates,
            "options": { "round_trip": round_trip },
        }),
        None => json!({ "coordinates": coordinates }),
    }
}

/// Service-reported error text, if any.
fn error_message(payload: &Value) -> String {
    payload
        .get("error")
        .and_then(|error| error.get("message").or(Some(error)))
        .and_then(Value::as_str)
        .or_else(|| payload.get("message").and_then(Value::as_str))
        .unwrap_or("Unknown error")
        .to_string()
}

fn first_feature_coordinate(payload: &Value) -> Option<Coordinate> {
    payload
        .get("features")?
        .as_array()?
        .first()?
        .pointer("/geometry/coordinates")
        .and_then(position)
}

/// `[lon, lat, ...]` to a coordinate, ignoring any elevation component.
fn position(value: &Value) -> Option<Coordinate> {
    let items = value.as_array()?;
    let lon = items.first()?.as_f64()?;
    let lat = items.get(1)?.as_f64()?;
    Some(Coordinate::new(lon, lat))
}

/// Decode route geometry from either response shape.
///
/// JSON responses carry an encoded polyline at `routes[0].geometry`; GeoJSON
/// responses carry `[lon, lat]` pairs at `features[0].geometry.coordinates`.
pub fn extract_geometry(payload: &Value) -> Result<Path, TripError> {
    if let Some(encoded) = payload.pointer("/routes/0/geometry").and_then(Value::as_str) {
        let path = polyline::decode(encoded)?;
        if !path.is_empty() {
            return Ok(path);
        }
    }

    if let Some(items) = payload
        .pointer("/features/0/geometry/coordinates")
        .and_then(Value::as_array)
    {
        let path: Option<Path> = items.iter().map(position).collect();
        if let Some(path) = path.filter(|path| !path.is_empty()) {
            return Ok(path);
        }
    }

    Err(TripError::upstream("No geometry found in routing response"))
}
