//! Core data models for trip planning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TripError;

/// A position in decimal degrees. Serialized as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lon, coord.lat]
    }
}

/// Ordered coordinate sequence. Usable for display once it has 2+ points.
pub type Path = Vec<Coordinate>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    /// Single-day loop trek with up to three alternative options.
    #[serde(alias = "trek")]
    Hike,
    /// Multi-day city-to-city ride.
    Bike,
}

impl TripType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::Hike => "hike",
            TripType::Bike => "bike",
        }
    }
}

/// Whether a caller-supplied type label names a single-day trek (`hike` or
/// `trek`). Any other label is narrated as a multi-day ride.
pub fn is_single_day(label: &str) -> bool {
    matches!(label.parse::<TripType>(), Ok(TripType::Hike))
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripType {
    type Err = TripError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hike" | "trek" => Ok(TripType::Hike),
            "bike" => Ok(TripType::Bike),
            other => Err(TripError::validation(format!(
                "unsupported trip type '{}'; use \"hike\" or \"bike\"",
                other
            ))),
        }
    }
}

/// A trip generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSpec {
    pub destination: String,
    #[serde(rename = "type")]
    pub trip_type: TripType,
    /// Ride duration; only meaningful for bike trips.
    #[serde(default)]
    pub days: Option<u32>,
}

impl TripSpec {
    pub fn new(destination: impl Into<String>, trip_type: TripType, days: Option<u32>) -> Self {
        Self {
            destination: destination.into(),
            trip_type,
            days,
        }
    }

    pub fn validate(&self) -> Result<(), TripError> {
        if self.destination.trim().is_empty() {
            return Err(TripError::validation("destination is required"));
        }
        if self.trip_type == TripType::Bike {
            if let Some(days) = self.days {
                if !(2..=3).contains(&days) {
                    return Err(TripError::validation(
                        "for bicycle trips, days must be 2 or 3",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Day count used for bike trips: 3 when explicitly requested, otherwise 2.
    pub fn bike_days(&self) -> usize {
        if self.days == Some(3) {
            3
        } else {
            2
        }
    }
}

/// Generated route: the default display path plus its day segments or options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub path: Path,
    #[serde(rename = "pathDays")]
    pub path_days: Vec<Path>,
}

impl RouteResult {
    /// Build a result whose primary path is the first segment.
    pub fn from_segments(path_days: Vec<Path>) -> Self {
        let path = path_days.first().cloned().unwrap_or_default();
        Self { path, path_days }
    }

    pub fn is_usable(&self) -> bool {
        self.path.len() >= 2
    }
}
