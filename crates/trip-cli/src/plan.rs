//! One-shot planning: generate, encode and optionally narrate a trip.

use serde::Serialize;

use trip_core::polyline::{encode_path, encode_path_days};
use trip_core::{
    enrich_route, generate_with_retry, Enrichment, Geocoder, RetryPolicy, RouteProvider,
    RouteResult, TextGenerator, TripError, TripSpec,
};

/// Compact polylines ready to be stored alongside a saved trip.
#[derive(Debug, Clone, Serialize)]
pub struct EncodedRoute {
    pub path: String,
    #[serde(rename = "pathDays")]
    pub path_days: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub destination: String,
    #[serde(rename = "type")]
    pub trip_type: String,
    #[serde(flatten)]
    pub route: RouteResult,
    pub encoded: EncodedRoute,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<Enrichment>,
}

/// Generate a route for `trip`, narrating it when a generator is supplied.
pub async fn plan_trip<G, P, T>(
    geocoder: &G,
    router: &P,
    narrator: Option<&T>,
    trip: &TripSpec,
    retry: RetryPolicy,
) -> Result<TripPlan, TripError>
where
    G: Geocoder + ?Sized,
    P: RouteProvider + ?Sized,
    T: TextGenerator + ?Sized,
{
    let route = generate_with_retry(geocoder, router, trip, retry).await?;

    let enrichment = match narrator {
        Some(narrator) => Some(
            enrich_route(
                narrator,
                &trip.destination,
                trip.trip_type.as_str(),
                &route,
                None,
            )
            .await,
        ),
        None => None,
    };

    let encoded = EncodedRoute {
        path: encode_path(&route.path),
        path_days: encode_path_days(&route.path_days),
    };

    Ok(TripPlan {
        destination: trip.destination.clone(),
        trip_type: trip.trip_type.to_string(),
        route,
        encoded,
        enrichment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use trip_core::polyline::decode;
    use trip_core::{destination_point, Coordinate, Path, RouteRequest, TripType};

    struct Origin;

    #[async_trait]
    impl Geocoder for Origin {
        async fn resolve(&self, _place: &str) -> Result<Coordinate, TripError> {
            Ok(Coordinate::new(34.99, 32.79))
        }
    }

    struct Ride;

    #[async_trait]
    impl RouteProvider for Ride {
        async fn fetch_route(&self, request: &RouteRequest) -> Result<Path, TripError> {
            let end = request.end.unwrap_or(request.start);
            Ok((0..=120)
                .map(|km| destination_point(end, km as f64, 180.0))
                .collect())
        }
    }

    struct Narrator;

    #[async_trait]
    impl TextGenerator for Narrator {
        async fn complete(&self, _prompt: &str) -> Result<String, TripError> {
            Ok(r#"{"title": "Coast ride", "overview": "", "segments": []}"#.to_string())
        }
    }

    fn retry() -> RetryPolicy {
        RetryPolicy::new(1, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn bike_plan_encodes_every_day() {
        let trip = TripSpec::new("Haifa", TripType::Bike, Some(3));
        let plan = plan_trip(&Origin, &Ride, None::<&Narrator>, &trip, retry())
            .await
            .unwrap();

        assert_eq!(plan.route.path_days.len(), 3);
        assert_eq!(plan.encoded.path_days.len(), 3);
        assert!(plan.enrichment.is_none());

        let decoded = decode(&plan.encoded.path).unwrap();
        assert_eq!(decoded.len(), plan.route.path.len());
        let first = plan.route.path[0];
        assert!((decoded[0].lon - first.lon).abs() < 1e-5);
        assert!((decoded[0].lat - first.lat).abs() < 1e-5);
    }

    #[tokio::test]
    async fn narration_fills_missing_overview() {
        let trip = TripSpec::new("Haifa", TripType::Bike, None);
        let plan = plan_trip(&Origin, &Ride, Some(&Narrator), &trip, retry())
            .await
            .unwrap();

        let json = serde_json::to_value(&plan).unwrap();

        let enrichment = plan.enrichment.as_ref().unwrap();
        assert_eq!(enrichment.title, "Coast ride");
        assert_eq!(enrichment.overview, "A bike route in Haifa. Enjoy your adventure!");
        assert_eq!(json["enrichment"]["title"], "Coast ride");
        assert_eq!(json["type"], "bike");
        assert!(json["pathDays"].is_array());
    }
}
