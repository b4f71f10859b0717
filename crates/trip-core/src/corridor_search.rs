//! Multi-day bike corridor search.
//!
//! Start points are projected from the destination over a fixed grid of
//! offsets and bearings; each candidate is routed to the destination and kept
//! when its total and per-day distances fall inside the ride bands.

use tracing::{debug, info, warn};

use crate::day_split::split_by_days;
use crate::error::TripError;
use crate::models::{Coordinate, Path};
use crate::routing::{Profile, RouteProvider, RouteRequest};
use crate::spatial::{destination_point, path_distance_km};

pub const MIN_KM_PER_DAY: f64 = 30.0;
pub const MAX_KM_PER_DAY: f64 = 70.0;
/// Slack on the total upper bound.
pub const TOTAL_TOLERANCE_KM: f64 = 15.0;
pub const DAY_TOLERANCE_KM: f64 = 5.0;
pub const MIN_DAYS: usize = 2;
pub const MAX_DAYS: usize = 3;

pub const OFFSETS_KM: [f64; 6] = [50.0, 40.0, 60.0, 35.0, 70.0, 30.0];
pub const BEARINGS_DEG: [f64; 8] = [0.0, 90.0, 180.0, 270.0, 45.0, 135.0, 225.0, 315.0];

/// One start-point candidate: `offset_km` away from the destination on `bearing_deg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub offset_km: f64,
    pub bearing_deg: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorridorRoute {
    pub path: Path,
    pub segments: Vec<Path>,
    pub total_km: f64,
}

/// Offset-major cartesian product of [`OFFSETS_KM`] and [`BEARINGS_DEG`].
///
/// Search order is the tie-break: earlier candidates win.
pub fn corridor_candidates() -> Vec<Candidate> {
    OFFSETS_KM
        .iter()
        .flat_map(|&offset_km| {
            BEARINGS_DEG.iter().map(move |&bearing_deg| Candidate {
                offset_km,
                bearing_deg,
            })
        })
        .collect()
}

/// Accepted total distance for a ride of `days` days.
pub fn total_band_km(days: usize) -> (f64, f64) {
    let days = days as f64;
    (
        days * MIN_KM_PER_DAY,
        days * MAX_KM_PER_DAY + TOTAL_TOLERANCE_KM,
    )
}

fn day_in_range(day: &[Coordinate]) -> bool {
    let km = path_distance_km(day);
    km >= MIN_KM_PER_DAY - DAY_TOLERANCE_KM && km <= MAX_KM_PER_DAY + DAY_TOLERANCE_KM
}

/// Find a `days`-day route ending at `destination`.
///
/// The first candidate whose every day lies in range is returned immediately.
/// A candidate that only satisfies the total band is remembered and returned
/// if the grid is exhausted without a fully in-range match.
pub async fn find_corridor<P>(
    provider: &P,
    destination: Coordinate,
    days: usize,
) -> Result<CorridorRoute, TripError>
where
    P: RouteProvider + ?Sized,
{
    let days = days.clamp(MIN_DAYS, MAX_DAYS);
    let (total_min, total_max) = total_band_km(days);
    let mut fallback: Option<CorridorRoute> = None;

    for candidate in corridor_candidates() {
        let start = destination_point(destination, candidate.offset_km, candidate.bearing_deg);
        let request = RouteRequest::point_to_point(start, destination, Profile::CyclingRegular);
        let path = match provider.fetch_route(&request).await {
            Ok(path) => path,
            Err(err) => {
                warn!(
                    "Corridor candidate {} km @ {}° failed: {}",
                    candidate.offset_km, candidate.bearing_deg, err
                );
                continue;
            }
        };

        let total_km = path_distance_km(&path);
        if total_km < total_min || total_km > total_max {
            debug!(
                "Corridor candidate {} km @ {}° rejected: {:.1} km outside {:.0}-{:.0} km",
                candidate.offset_km, candidate.bearing_deg, total_km, total_min, total_max
            );
            continue;
        }

        let segments = split_by_days(&path, days);
        let route = CorridorRoute {
            path,
            segments,
            total_km,
        };
        if route.segments.iter().all(|day| day_in_range(day)) {
            info!(
                "Corridor found: {} days, {:.1} km from {} km @ {}°",
                days, total_km, candidate.offset_km, candidate.bearing_deg
            );
            return Ok(route);
        }

        debug!(
            "Corridor candidate {} km @ {}° has uneven days; kept as fallback",
            candidate.offset_km, candidate.bearing_deg
        );
        if fallback.is_none() {
            fallback = Some(route);
        }
    }

    if let Some(route) = fallback {
        info!(
            "Corridor fallback: {} days, {:.1} km with per-day deviations",
            days, route.total_km
        );
        return Ok(route);
    }

    Err(TripError::RouteNotFound(format!(
        "Could not find a {}-day bike route near destination (30–70 km/day). Try another place.",
        days
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Northbound path of `km` with 1 km legs, ending near `end`.
    fn straight_path(end: Coordinate, km: f64) -> Path {
        let steps = km.round() as usize;
        let origin = destination_point(end, km, 180.0);
        (0..=steps)
            .map(|i| destination_point(origin, km * i as f64 / steps as f64, 0.0))
            .collect()
    }

    /// Returns a fixed-length route for every request, or one shaped by `route_for`.
    struct CorridorMock {
        starts: Mutex<Vec<Coordinate>>,
        route_for: Box<dyn Fn(usize, Coordinate) -> Result<Path, TripError> + Send + Sync>,
    }

    impl CorridorMock {
        fn new(
            route_for: impl Fn(usize, Coordinate) -> Result<Path, TripError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                starts: Mutex::new(Vec::new()),
                route_for: Box::new(route_for),
            }
        }

        fn calls(&self) -> usize {
            self.starts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RouteProvider for CorridorMock {
        async fn fetch_route(&self, request: &RouteRequest) -> Result<Path, TripError> {
            assert!(request.round_trip.is_none());
            assert_eq!(request.profile, Profile::CyclingRegular);
            let end = request.end.expect("corridor routes have an end point");
            let index = {
                let mut starts = self.starts.lock().unwrap();
                starts.push(request.start);
                starts.len() - 1
            };
            (self.route_for)(index, end)
        }
    }

    #[test]
    fn candidates_are_offset_major() {
        let candidates = corridor_candidates();
        assert_eq!(candidates.len(), 48);
        assert_eq!(candidates[0], Candidate { offset_km: 50.0, bearing_deg: 0.0 });
        assert_eq!(candidates[1], Candidate { offset_km: 50.0, bearing_deg: 90.0 });
        assert_eq!(candidates[7], Candidate { offset_km: 50.0, bearing_deg: 315.0 });
        assert_eq!(candidates[8], Candidate { offset_km: 40.0, bearing_deg: 0.0 });
        assert_eq!(candidates[47], Candidate { offset_km: 30.0, bearing_deg: 315.0 });
    }

    #[test]
    fn total_band_scales_with_days() {
        assert_eq!(total_band_km(2), (60.0, 155.0));
        assert_eq!(total_band_km(3), (90.0, 225.0));
    }

    #[tokio::test]
    async fn uniform_routes_return_first_searched_pair() {
        let destination = Coordinate::new(34.78, 32.08);
        let mock = CorridorMock::new(|_, end| Ok(straight_path(end, 130.0)));

        let route = find_corridor(&mock, destination, 2).await.unwrap();

        assert_eq!(mock.calls(), 1);
        let first_start = mock.starts.lock().unwrap()[0];
        assert_eq!(first_start, destination_point(destination, 50.0, 0.0));
        assert_eq!(route.segments.len(), 2);
        assert!((route.total_km - 130.0).abs() < 1e-6);
        for day in &route.segments {
            let km = path_distance_km(day);
            assert!((25.0..=75.0).contains(&km), "day = {km}");
        }
    }

    #[tokio::test]
    async fn day_count_is_clamped() {
        let destination = Coordinate::new(34.78, 32.08);
        let mock = CorridorMock::new(|_, end| Ok(straight_path(end, 150.0)));
        let route = find_corridor(&mock, destination, 5).await.unwrap();
        assert_eq!(route.segments.len(), 3);

        let mock = CorridorMock::new(|_, end| Ok(straight_path(end, 100.0)));
        let route = find_corridor(&mock, destination, 1).await.unwrap();
        assert_eq!(route.segments.len(), 2);
    }

    #[tokio::test]
    async fn out_of_band_and_failed_candidates_are_skipped() {
        let destination = Coordinate::new(34.78, 32.08);
        let mock = CorridorMock::new(|index, end| match index {
            0 => Err(TripError::upstream("HTTP 502")),
            1 => Ok(straight_path(end, 20.0)),
            2 => Ok(straight_path(end, 300.0)),
            _ => Ok(straight_path(end, 120.0)),
        });

        let route = find_corridor(&mock, destination, 2).await.unwrap();
        assert_eq!(mock.calls(), 4);
        assert!((route.total_km - 120.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn strict_match_is_preferred_over_earlier_loose_match() {
        let destination = Coordinate::new(34.78, 32.08);
        // 3 days over 95 km splits into ~32 km days; with one 80 km leg the
        // first candidate passes the total band but not the per-day band.
        let mock = CorridorMock::new(|index, end| {
            if index == 0 {
                let origin = destination_point(end, 95.0, 180.0);
                let mid = destination_point(origin, 80.0, 0.0);
                let tail: Path = (1..=15)
                    .map(|i| destination_point(mid, i as f64, 0.0))
                    .collect();
                let mut path = vec![origin, mid];
                path.extend(tail);
                Ok(path)
            } else if index == 5 {
                Ok(straight_path(end, 150.0))
            } else {
                Ok(straight_path(end, 10.0))
            }
        });

        let route = find_corridor(&mock, destination, 3).await.unwrap();
        assert_eq!(mock.calls(), 6);
        assert!((route.total_km - 150.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn loose_match_is_used_when_grid_has_no_strict_match() {
        let destination = Coordinate::new(34.78, 32.08);
        let mock = CorridorMock::new(|index, end| {
            if index == 3 {
                let origin = destination_point(end, 95.0, 180.0);
                let mid = destination_point(origin, 80.0, 0.0);
                Ok(vec![origin, mid, destination_point(mid, 15.0, 0.0)])
            } else {
                Err(TripError::upstream("HTTP 500"))
            }
        });

        let route = find_corridor(&mock, destination, 3).await.unwrap();
        assert_eq!(mock.calls(), 48);
        assert!((route.total_km - 95.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn exhausted_grid_names_day_count() {
        let destination = Coordinate::new(34.78, 32.08);
        let mock = CorridorMock::new(|_, end| Ok(straight_path(end, 10.0)));
        let err = find_corridor(&mock, destination, 3).await.unwrap_err();
        assert_eq!(mock.calls(), 48);
        match err {
            TripError::RouteNotFound(message) => assert!(message.contains("3-day")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
