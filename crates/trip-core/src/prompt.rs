//! Prompt construction for route narration.

use serde_json::Value;

use crate::models::{is_single_day, RouteResult};
use crate::spatial::path_distance_km;

const SCHEMA_TEMPLATE: &str = r#"{
  "title": "Route title",
  "overview": "Brief description",
  "bestWindows": ["tip1", "tip2"],
  "segments": [{"name": "name", "description": "desc", "difficulty": "easy", "highlights": ["h1", "h2"]}],
  "pois": [{"name": "name", "type": "type", "description": "desc", "coordinates": [0, 0]}],
  "safety_tips": ["tip1", "tip2"],
  "gear_checklist": ["item1", "item2"],
  "food_stops": [{"name": "name", "type": "type", "description": "desc"}],
  "photo_spots": [{"name": "name", "description": "desc", "best_time": "time"}]
}"#;

/// Build the narration prompt for a generated route.
pub fn build_prompt(
    destination: &str,
    trip_type: &str,
    route: &RouteResult,
    weather: Option<&Value>,
) -> String {
    let (route_info, day_hint) = route_summary(destination, is_single_day(trip_type), route);
    let weather_line = weather
        .map(|daily| format!("Weather: {}", daily))
        .unwrap_or_default();

    format!(
        "Create a travel guide for a {trip_type} route in {destination}.\n\n\
         {route_info}. {day_hint}\n\
         {weather_line}\n\n\
         IMPORTANT: Return ONLY valid JSON. Do not include any text before or after the JSON. \
         No explanations, no \"Here is the response:\", nothing except the JSON object.\n\n\
         {SCHEMA_TEMPLATE}"
    )
}

fn route_summary(destination: &str, single_day: bool, route: &RouteResult) -> (String, String) {
    if single_day && route.path_days.len() > 1 {
        let option_km: Vec<f64> = route
            .path_days
            .iter()
            .map(|option| path_distance_km(option))
            .filter(|km| *km > 0.0)
            .collect();
        let km_list = option_km
            .iter()
            .map(|km| format!("{:.1} km", km))
            .collect::<Vec<_>>()
            .join(", ");
        let range = match (
            option_km.iter().copied().reduce(f64::min),
            option_km.iter().copied().reduce(f64::max),
        ) {
            (Some(min), Some(max)) => format!("{:.1}–{:.1} km", min, max),
            _ => String::new(),
        };
        let options = route.path_days.len();
        return (
            format!("Route info: 1 day(s), {} route options ({})", options, km_list),
            format!(
                "This is a single-day trek with multiple route options. Write the overview and \
                 segment so they apply to ALL options, e.g. \"Explore {destination} with several \
                 loop options ({range})\" or \"choose from {options} routes\". Do NOT describe only \
                 one specific distance. Return exactly ONE segment (general description for the area)."
            ),
        );
    }

    let total_km = path_distance_km(&route.path);
    if single_day {
        return (
            format!("Route info: 1 day(s), {:.1} km", total_km),
            "This is a single-day trek. Return exactly ONE segment for this day.".to_string(),
        );
    }

    let days = route.path_days.len();
    let mapping = (1..=days)
        .map(|day| format!("Segment {day} = Day {day}"))
        .collect::<Vec<_>>()
        .join(", ");
    (
        format!("Route info: {} day(s), {:.1} km", days, total_km),
        format!(
            "This is a {days}-day bicycle trip. You MUST return exactly {days} segments, \
             one per day. {mapping}. Do not return more than {days} segments."
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Path};
    use crate::spatial::destination_point;
    use serde_json::json;

    fn line(km: f64) -> Path {
        let start = Coordinate::new(35.0, 31.0);
        vec![start, destination_point(start, km, 0.0)]
    }

    #[test]
    fn multi_option_hike_lists_every_option() {
        let route = RouteResult::from_segments(vec![line(5.1), line(6.7), line(7.8)]);
        let prompt = build_prompt("Carmel", "hike", &route, None);
        assert!(prompt.contains("3 route options (5.1 km, 6.7 km, 7.8 km)"));
        assert!(prompt.contains("5.1–7.8 km"));
        assert!(prompt.contains("exactly ONE segment"));
        assert!(!prompt.contains("Weather:"));
    }

    #[test]
    fn bike_prompt_pins_segment_count_and_weather() {
        let route = RouteResult::from_segments(vec![line(50.0), line(50.0), line(50.0)]);
        let weather = json!([{"day": 1, "max_c": 24}]);
        let prompt = build_prompt("Galilee", "bike", &route, Some(&weather));
        assert!(prompt.contains("a bike route in Galilee"));
        assert!(prompt.contains("exactly 3 segments"));
        assert!(prompt.contains("Segment 3 = Day 3"));
        assert!(prompt.contains("Weather: [{\"day\":1,\"max_c\":24}]"));
        assert!(prompt.contains("\"photo_spots\""));
    }

    #[test]
    fn single_option_hike_reports_distance() {
        let route = RouteResult::from_segments(vec![line(7.3)]);
        let prompt = build_prompt("Masada", "trek", &route, None);
        assert!(prompt.contains("Route info: 1 day(s), 7.3 km."));
        assert!(prompt.contains("single-day trek. Return exactly ONE segment"));
        assert!(prompt.contains("a trek route in Masada"));
    }

    #[test]
    fn unknown_type_is_narrated_per_day() {
        let route = RouteResult::from_segments(vec![line(20.0), line(20.0)]);
        let prompt = build_prompt("Jordan River", "kayak", &route, None);
        assert!(prompt.contains("a kayak route in Jordan River"));
        assert!(prompt.contains("exactly 2 segments"));
    }
}
