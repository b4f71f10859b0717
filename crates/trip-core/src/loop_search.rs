//! Round-trip trek search: find a loop between 5 and 10 km.

use tracing::{debug, warn};

use crate::error::TripError;
use crate::models::{Coordinate, Path};
use crate::routing::{Profile, RouteProvider, RouteRequest};
use crate::spatial::path_distance_km;

pub const MIN_LOOP_KM: f64 = 5.0;
pub const MAX_LOOP_KM: f64 = 10.0;
/// Requested loop lengths in search order.
pub const LOOP_CANDIDATES_KM: [f64; 6] = [8.0, 7.0, 9.0, 6.0, 10.0, 5.0];
const LOOP_WAYPOINTS: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct LoopRoute {
    pub path: Path,
    pub km: f64,
}

/// Candidate lengths with an in-range preferred length moved to the front.
pub fn loop_candidates(preferred_km: Option<f64>) -> Vec<f64> {
    match preferred_km {
        Some(preferred) if (MIN_LOOP_KM..=MAX_LOOP_KM).contains(&preferred) => {
            std::iter::once(preferred)
                .chain(
                    LOOP_CANDIDATES_KM
                        .iter()
                        .copied()
                        .filter(|candidate| *candidate != preferred),
                )
                .collect()
        }
        _ => LOOP_CANDIDATES_KM.to_vec(),
    }
}

/// Request loops of each candidate length until one measures 5–10 km.
///
/// Individual candidate failures are skipped; the first in-range loop wins.
pub async fn find_loop<P>(
    provider: &P,
    origin: Coordinate,
    preferred_km: Option<f64>,
) -> Result<LoopRoute, TripError>
where
    P: RouteProvider + ?Sized,
{
    for length_km in loop_candidates(preferred_km) {
        let request = RouteRequest::round_trip(
            origin,
            Profile::FootHiking,
            (length_km * 1000.0).round() as u32,
            LOOP_WAYPOINTS,
        );
        let path = match provider.fetch_route(&request).await {
            Ok(path) => path,
            Err(err) => {
                warn!("Loop candidate {} km failed: {}", length_km, err);
                continue;
            }
        };

        let km = path_distance_km(&path);
        if (MIN_LOOP_KM..=MAX_LOOP_KM).contains(&km) {
            debug!("Loop candidate {} km accepted at {:.2} km", length_km, km);
            return Ok(LoopRoute { path, km });
        }
        debug!("Loop candidate {} km rejected at {:.2} km", length_km, km);
    }

    Err(TripError::RouteNotFound(
        "Could not generate a loop hike between 5–10 km. Try another location.".to_string(),
    ))
}
