//! Trip generation: geocode the destination, then search for a hike loop set
//! or a multi-day bike corridor.

use std::time::Duration;
use tracing::{info, warn};

use crate::backoff::Backoff;
use crate::corridor_search::find_corridor;
use crate::error::TripError;
use crate::loop_search::find_loop;
use crate::models::{RouteResult, TripSpec, TripType};
use crate::routing::{Geocoder, RouteProvider};

/// Preferred loop lengths, one per hike option.
pub const HIKE_OPTION_LENGTHS_KM: [f64; 3] = [6.0, 8.0, 10.0];

/// Whole-generation retry envelope applied by callers of [`generate`].
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    /// `attempts` tries with a linear `step`, `2 * step`, ... pause in between.
    pub fn new(attempts: u32, step: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff: Backoff::linear(step, step.saturating_mul(attempts.max(1))),
        }
    }
}

/// Generate a route for `trip`.
///
/// Hikes produce one to three loop options from the geocoded start; bikes
/// produce one corridor split into its days.
pub async fn generate<G, P>(geocoder: &G, provider: &P, trip: &TripSpec) -> Result<RouteResult, TripError>
where
    G: Geocoder + ?Sized,
    P: RouteProvider + ?Sized,
{
    trip.validate()?;
    let origin = geocoder.resolve(&trip.destination).await?;

    match trip.trip_type {
        TripType::Hike => {
            let mut options = Vec::with_capacity(HIKE_OPTION_LENGTHS_KM.len());
            for preferred_km in HIKE_OPTION_LENGTHS_KM {
                match find_loop(provider, origin, Some(preferred_km)).await {
                    Ok(found) => options.push(found.path),
                    Err(err) if options.is_empty() => return Err(err),
                    Err(err) => {
                        warn!(
                            "Stopping after {} hike option(s) for '{}': {}",
                            options.len(),
                            trip.destination,
                            err
                        );
                        break;
                    }
                }
            }
            Ok(RouteResult::from_segments(options))
        }
        TripType::Bike => {
            let corridor = find_corridor(provider, origin, trip.bike_days()).await?;
            // The primary path is the whole ride, not day one.
            Ok(RouteResult {
                path: corridor.path,
                path_days: corridor.segments,
            })
        }
    }
}

fn exhausted(attempts: u32) -> TripError {
    TripError::RouteNotFound(format!(
        "Could not generate route after {} attempts. Try a different destination or try again later.",
        attempts
    ))
}

/// Run [`generate`] under `policy`, stopping at the first usable route.
///
/// Validation failures are returned immediately; any other failure, or a
/// result whose path has fewer than two points, is retried. The last error is
/// returned when every attempt fails.
pub async fn generate_with_retry<G, P>(
    geocoder: &G,
    provider: &P,
    trip: &TripSpec,
    policy: RetryPolicy,
) -> Result<RouteResult, TripError>
where
    G: Geocoder + ?Sized,
    P: RouteProvider + ?Sized,
{
    trip.validate()?;
    let mut last_error = exhausted(policy.attempts);

    for attempt in 1..=policy.attempts {
        match generate(geocoder, provider, trip).await {
            Ok(result) if result.is_usable() => {
                info!(
                    "Generated {} route for '{}' on attempt {} ({} segment(s))",
                    trip.trip_type,
                    trip.destination,
                    attempt,
                    result.path_days.len()
                );
                return Ok(result);
            }
            Ok(_) => {
                warn!("Attempt {} produced an unusable path", attempt);
            }
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) => {
                warn!("Route generation attempt {} failed: {}", attempt, err);
                last_error = err;
            }
        }

        if attempt < policy.attempts {
            tokio::time::sleep(policy.backoff.delay(attempt)).await;
        }
    }

    Err(last_error)
}
