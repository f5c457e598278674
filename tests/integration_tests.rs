//! End-to-end tests for the packing engine and the HTTP service

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use packwise::api::AppState;
use packwise::cache::PersistentCache;
use packwise::packing::catalog::{CLOTHING, TOILETRIES};
use packwise::planner::PackingPlanner;
use packwise::storage::MemoryStore;
use packwise::{ClimateCategory, TravelerType, TripRequest, generate, progress_percent, toggle_packed, web};

#[test]
fn test_every_climate_and_traveler_pair_has_core_categories() {
    let temperatures = [35.0, 27.0, 22.0, 17.0, 10.0, 2.0, -5.0, -20.0];
    for celsius in temperatures {
        for traveler in TravelerType::ALL {
            let request = TripRequest::new("Anywhere", 7, traveler).with_temperature(celsius);
            let list = generate(&request).unwrap();
            assert!(list.category(CLOTHING).is_some_and(|c| !c.is_empty()), "{celsius} / {traveler:?}");
            assert!(list.category(TOILETRIES).is_some(), "{celsius} / {traveler:?}");
        }
    }
}

#[test]
fn test_unknown_destination_is_temperate() {
    let list = generate(&TripRequest::new("Random Town, Nowhere", 4, TravelerType::Couple)).unwrap();
    assert_eq!(list.generated_for.climate, ClimateCategory::Temperate);
    assert!(!list.special_items.is_empty());
    assert!(!list.destination_tips.is_empty());
}

#[test]
fn test_packing_round() {
    let mut list = generate(&TripRequest::new("Barcelona", 10, TravelerType::Business)).unwrap();
    assert_eq!(progress_percent(&list), 0);

    let pairs: Vec<(String, String)> = list
        .categories
        .iter()
        .flat_map(|c| c.items.iter().map(move |i| (c.name.clone(), i.name.clone())))
        .collect();
    for (category, item) in &pairs {
        list = toggle_packed(&list, category, item);
    }
    assert_eq!(progress_percent(&list), 100);

    let unchanged = toggle_packed(&list, "Nope", "Nothing");
    assert_eq!(unchanged, list);
}

fn memory_app() -> Router {
    web::app(AppState::new(PackingPlanner::new(Arc::new(MemoryStore::new()))))
}

async fn call(app: Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_api_is_mounted_under_prefix() {
    let body = json!({"destination": "Cancun", "durationDays": 6, "travelerType": "couple-with-kids"});
    let (status, value) = call(memory_app(), "POST", "/api/packing-lists", Some(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["list"]["generatedFor"]["travelerType"], "CoupleWithKids");
    let names: Vec<&str> = value["list"]["categories"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert!(names.contains(&"Family Essentials"));

    let (status, _) = call(memory_app(), "POST", "/packing-lists", Some(body.to_string())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let body = json!({
        "destination": "x".repeat(100 * 1024),
        "durationDays": 3,
        "travelerType": "Couple"
    });
    let (status, _) = call(memory_app(), "POST", "/api/packing-lists", Some(body.to_string())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_saved_lists_are_shared_through_persistent_storage() {
    let dir = TempDir::new().unwrap();
    let cache = PersistentCache::open(dir.path()).unwrap();

    let writer = web::app(AppState::new(PackingPlanner::new(Arc::new(cache.clone()))));
    let body = json!({
        "destination": "Zermatt",
        "durationDays": 5,
        "travelerType": "SoloMale",
        "saveAs": "ski"
    });
    let (status, value) = call(writer, "POST", "/api/packing-lists", Some(body.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["list"]["generatedFor"]["climate"], "Alpine");

    let reader = web::app(AppState::new(PackingPlanner::new(Arc::new(cache))));
    let (status, value) = call(reader, "GET", "/api/packing-lists/ski", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["list"]["generatedFor"]["destination"], "Zermatt");
    assert_eq!(value["progressPercent"], 0);
}
