//! REST API routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use trip_core::{
    enrich_route, generate_with_retry, Coordinate, Enrichment, Path, Profile, RoundTrip,
    RouteRequest, RouteResult, TripSpec, TripType,
};

use crate::api::error::ApiError;
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/geocode", post(geocode))
        .route("/api/routes/generate", post(route_between))
        .route("/api/generate-route", post(generate_route))
        .route("/api/llm/enrich", post(enrich))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Trip planner API" }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeocodeRequest {
    #[serde(default)]
    city_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct CoordinatesResponse<T> {
    coordinates: T,
}

/// Resolve a city name to `[lon, lat]`.
async fn geocode(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GeocodeRequest>, JsonRejection>,
) -> Result<Json<CoordinatesResponse<Coordinate>>, ApiError> {
    let Json(req) = payload?;
    let city = req
        .city_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("City name is required"))?;

    let coordinates = state.geocoder.resolve(&city).await?;
    Ok(Json(CoordinatesResponse { coordinates }))
}

#[derive(Debug, Default, Deserialize)]
struct RouteOptions {
    #[serde(default)]
    round_trip: Option<RoundTrip>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteBetweenRequest {
    #[serde(default)]
    start_coords: Option<Coordinate>,
    #[serde(default)]
    end_coords: Option<Coordinate>,
    #[serde(default, rename = "type")]
    profile: Option<String>,
    #[serde(default)]
    options: Option<RouteOptions>,
}

/// Raw routing call: point-to-point, or a round trip when options ask for one.
async fn route_between(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RouteBetweenRequest>, JsonRejection>,
) -> Result<Json<CoordinatesResponse<Path>>, ApiError> {
    let Json(req) = payload?;
    let start = req
        .start_coords
        .ok_or_else(|| ApiError::bad_request("Start coordinates are required"))?;
    let profile = req
        .profile
        .as_deref()
        .map(Profile::parse_or_default)
        .unwrap_or_default();

    let request = match req.options.and_then(|options| options.round_trip) {
        Some(round_trip) => {
            RouteRequest::round_trip(start, profile, round_trip.length, round_trip.points)
        }
        None => {
            let end = req.end_coords.ok_or_else(|| {
                ApiError::bad_request("End coordinates are required when not round_trip")
            })?;
            RouteRequest::point_to_point(start, end, profile)
        }
    };

    let coordinates = state.router.fetch_route(&request).await?;
    Ok(Json(CoordinatesResponse { coordinates }))
}

#[derive(Debug, Deserialize)]
struct GenerateRouteRequest {
    #[serde(default)]
    destination: Option<String>,
    #[serde(default, rename = "type")]
    trip_type: Option<String>,
    /// Number or numeric string; anything else is treated as out of range.
    #[serde(default)]
    days: Option<Value>,
}

/// Day count from a loosely typed field. `null` means "not given".
fn parse_days(value: Option<&Value>) -> Option<u32> {
    let days = match value? {
        Value::Null => return None,
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    Some(days.and_then(|days| u32::try_from(days).ok()).unwrap_or(0))
}

#[derive(Debug, Serialize)]
struct GenerateRouteResponse {
    destination: String,
    #[serde(rename = "type")]
    trip_type: String,
    #[serde(flatten)]
    route: RouteResult,
}

/// Generate a hike loop set or a multi-day bike corridor for a destination.
async fn generate_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRouteRequest>, JsonRejection>,
) -> Result<Json<GenerateRouteResponse>, ApiError> {
    let Json(req) = payload?;
    let (destination, type_name) = match (req.destination, req.trip_type) {
        (Some(destination), Some(type_name)) if !destination.trim().is_empty() => {
            (destination, type_name)
        }
        _ => return Err(ApiError::bad_request("Destination and type are required")),
    };
    let trip_type: TripType = type_name.parse()?;
    let trip = TripSpec::new(destination.trim(), trip_type, parse_days(req.days.as_ref()));

    tracing::info!("Generating {} route for '{}'", trip.trip_type, trip.destination);
    let route = generate_with_retry(
        state.geocoder.as_ref(),
        state.router.as_ref(),
        &trip,
        state.retry,
    )
    .await?;

    Ok(Json(GenerateRouteResponse {
        destination: trip.destination,
        trip_type: type_name,
        route,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrichRequest {
    #[serde(default)]
    destination: Option<String>,
    #[serde(default, rename = "type")]
    trip_type: Option<String>,
    #[serde(default)]
    path: Option<Path>,
    #[serde(default)]
    path_days: Option<Vec<Path>>,
    #[serde(default)]
    weather_daily: Option<Value>,
}

/// Narrate a generated route. Always answers 200 once the required fields are
/// present, whatever the trip type label.
async fn enrich(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EnrichRequest>, JsonRejection>,
) -> Result<Json<Enrichment>, ApiError> {
    let Json(req) = payload?;
    let (destination, type_name, path, path_days) =
        match (req.destination, req.trip_type, req.path, req.path_days) {
            (Some(destination), Some(type_name), Some(path), Some(path_days))
                if !destination.trim().is_empty() && !type_name.trim().is_empty() =>
            {
                (destination, type_name, path, path_days)
            }
            _ => {
                return Err(ApiError::bad_request(
                    "Destination, type, path, and pathDays are required",
                ))
            }
        };
    let route = RouteResult { path, path_days };

    let enrichment = enrich_route(
        state.narrator.as_ref(),
        &destination,
        type_name.trim(),
        &route,
        req.weather_daily.as_ref().filter(|weather| !weather.is_null()),
    )
    .await;
    Ok(Json(enrichment))
}
