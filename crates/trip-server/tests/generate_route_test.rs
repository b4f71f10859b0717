//! Route generation integration tests.
//!
//! Exercises the full geocode → search → narrate flow over HTTP.
//!
//! Run with: cargo test --test generate_route_test -- --ignored
//! Requires a running trip server with ORS_API_KEY set.

use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

fn base_url() -> String {
    std::env::var("TRIP_TEST_URL").unwrap_or_else(|_| "http://localhost:5001".to_string())
}

fn client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(180))
        .build()
        .unwrap()
}

/// A hike yields one to three loop options, the first mirrored in `path`.
#[tokio::test]
#[ignore]
async fn test_hike_generation_returns_loop_options() {
    let resp = client()
        .post(format!("{}/api/generate-route", base_url()))
        .json(&json!({"destination": "Haifa", "type": "hike"}))
        .send()
        .await
        .expect("request failed");

    assert!(resp.status().is_success(), "status {}", resp.status());
    let body: Value = resp.json().await.unwrap();
    let options = body["pathDays"].as_array().unwrap();
    assert!((1..=3).contains(&options.len()));
    assert_eq!(body["path"], options[0]);
    assert!(body["path"].as_array().unwrap().len() >= 2);
}

/// A three-day ride comes back as three contiguous day segments.
#[tokio::test]
#[ignore]
async fn test_bike_generation_then_enrichment() {
    let client = client();
    let base = base_url();

    let resp = client
        .post(format!("{}/api/generate-route", base))
        .json(&json!({"destination": "Tel Aviv", "type": "bike", "days": 3}))
        .send()
        .await
        .expect("request failed");
    assert!(resp.status().is_success(), "status {}", resp.status());
    let route: Value = resp.json().await.unwrap();
    let days = route["pathDays"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    for pair in days.windows(2) {
        let previous = pair[0].as_array().unwrap();
        assert_eq!(previous.last(), pair[1].as_array().unwrap().first());
    }

    let resp = client
        .post(format!("{}/api/llm/enrich", base))
        .json(&json!({
            "destination": "Tel Aviv",
            "type": "bike",
            "path": route["path"],
            "pathDays": route["pathDays"],
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), 200);
    let enrichment: Value = resp.json().await.unwrap();
    assert!(!enrichment["title"].as_str().unwrap().is_empty());
    assert!(enrichment["segments"].as_array().unwrap().len() <= 3);
}

/// Bad day counts are rejected before any upstream call.
#[tokio::test]
#[ignore]
async fn test_invalid_bike_days_rejected() {
    let resp = client()
        .post(format!("{}/api/generate-route", base_url()))
        .json(&json!({"destination": "Tel Aviv", "type": "bike", "days": 4}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), 400);
}
