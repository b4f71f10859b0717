//! Service seams for geocoding, routing and text generation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TripError;
use crate::models::{Coordinate, Path};

/// Travel modes understood by the routing service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    #[default]
    CyclingRegular,
    FootHiking,
    DrivingCar,
    DrivingHgv,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::CyclingRegular => "cycling-regular",
            Profile::FootHiking => "foot-hiking",
            Profile::DrivingCar => "driving-car",
            Profile::DrivingHgv => "driving-hgv",
        }
    }

    /// Parse a profile name, falling back to cycling for anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim() {
            "foot-hiking" => Profile::FootHiking,
            "driving-car" => Profile::DrivingCar,
            "driving-hgv" => Profile::DrivingHgv,
            _ => Profile::CyclingRegular,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loop request options: target length in meters and generated waypoint count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTrip {
    pub length: u32,
    pub points: u32,
}

/// A single routing call. Round trips carry no end point.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: Coordinate,
    pub end: Option<Coordinate>,
    pub profile: Profile,
    pub round_trip: Option<RoundTrip>,
}

impl RouteRequest {
    pub fn point_to_point(start: Coordinate, end: Coordinate, profile: Profile) -> Self {
        Self {
            start,
            end: Some(end),
            profile,
            round_trip: None,
        }
    }

    pub fn round_trip(start: Coordinate, profile: Profile, length_m: u32, points: u32) -> Self {
        Self {
            start,
            end: None,
            profile,
            round_trip: Some(RoundTrip {
                length: length_m,
                points,
            }),
        }
    }

    /// Coordinates sent to the service: start only for loops, start and end otherwise.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        match (self.round_trip, self.end) {
            (None, Some(end)) => vec![self.start, end],
            _ => vec![self.start],
        }
    }
}

/// Resolves a place name to a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, place: &str) -> Result<Coordinate, TripError>;
}

/// Produces a coordinate path for a routing request.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn fetch_route(&self, request: &RouteRequest) -> Result<Path, TripError>;
}

/// Free-text completion from a generative model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, TripError>;
}
