//! Trip Core - route search, day splitting and narration parsing
//!
//! Pure logic plus the async service seams; HTTP clients live in `trip-upstream`.

pub mod backoff;
pub mod corridor_search;
pub mod day_split;
pub mod enrichment;
pub mod error;
pub mod extract;
pub mod generation;
pub mod loop_search;
pub mod models;
pub mod polyline;
pub mod prompt;
pub mod routing;
pub mod spatial;

pub use backoff::Backoff;
pub use corridor_search::{find_corridor, CorridorRoute};
pub use day_split::split_by_days;
pub use enrichment::{enrich_route, Enrichment, FoodStop, PhotoSpot, Poi, Segment};
pub use error::TripError;
pub use generation::{generate, generate_with_retry, RetryPolicy};
pub use loop_search::{find_loop, LoopRoute};
pub use models::{is_single_day, Coordinate, Path, RouteResult, TripSpec, TripType};
pub use routing::{Geocoder, Profile, RoundTrip, RouteProvider, RouteRequest, TextGenerator};
pub use spatial::{destination_point, distance_km, path_distance_km};
