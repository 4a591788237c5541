//! HTTP-level integration tests for the drone zone endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use std::collections::HashSet;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, delete, get, patch_json, post_json, SEED_COUNT};
use serde_json::json;

fn test_pad() -> serde_json::Value {
    json!({
        "title": "Test Pad",
        "latitude": -41.0,
        "longitude": 174.0,
        "reason": "private",
        "zoneType": "controlled"
    })
}

async fn create(app: &axum::Router, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(app.clone(), "/api/drone-zones", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// List / get
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_seed_zones() {
    let app = common::build_test_app();
    let response = get(app, "/api/drone-zones").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let zones = json.as_array().unwrap();
    assert_eq!(zones.len(), SEED_COUNT);
    assert_eq!(zones[0]["title"], "Auckland International Airport");
    assert!(zones.iter().all(|z| z["status"] == "active"));
}

#[tokio::test]
async fn list_on_empty_store_returns_empty_array() {
    let app = common::build_empty_app();
    let json = body_json(get(app, "/api/drone-zones").await).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn get_seed_zone_by_id() {
    let app = common::build_test_app();
    let response = get(app, "/api/drone-zones/2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], "2");
    assert_eq!(json["title"], "Wellington Hospital Helipad");
    assert_eq!(json["emergencyContact"], "+64-4-385-5999");
    assert_eq!(json["zoneType"], "controlled");
}

#[tokio::test]
async fn get_unknown_zone_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/drone-zones/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Zone not found");
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_pending_record() {
    let app = common::build_test_app();
    let json = create(&app, test_pad()).await;

    assert_eq!(json["title"], "Test Pad");
    assert_eq!(json["status"], "pending");
    assert!(json["details"].is_null());
    assert!(json["emergencyContact"].is_null());
    assert_eq!(json["createdAt"], json["updatedAt"]);
    assert!(json["id"].as_str().is_some_and(|id| !id.is_empty()));

    // The new zone is readable afterwards.
    let id = json["id"].as_str().unwrap();
    let response = get(app, &format!("/api/drone-zones/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_ignores_client_supplied_status() {
    let app = common::build_test_app();
    let mut body = test_pad();
    body["status"] = json!("active");
    body["id"] = json!("chosen-by-client");

    let json = create(&app, body).await;
    assert_eq!(json["status"], "pending");
    assert_ne!(json["id"], "chosen-by-client");
}

#[tokio::test]
async fn create_with_empty_title_returns_400() {
    let app = common::build_test_app();
    let mut body = test_pad();
    body["title"] = json!("");

    let response = post_json(app, "/api/drone-zones", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("Title is required"), "{message}");
}

#[tokio::test]
async fn create_with_out_of_range_coordinates_returns_400() {
    let app = common::build_test_app();
    let mut body = test_pad();
    body["latitude"] = json!(91.0);
    body["longitude"] = json!(-200.0);

    let response = post_json(app, "/api/drone-zones", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = body_json(response).await["message"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(message.contains("\"latitude\""), "{message}");
    assert!(message.contains("\"longitude\""), "{message}");
}

#[tokio::test]
async fn create_with_unknown_zone_type_returns_400() {
    let app = common::build_test_app();
    let mut body = test_pad();
    body["zoneType"] = json!("forbidden");

    let response = post_json(app, "/api/drone-zones", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_wrong_field_type_returns_400() {
    let app = common::build_test_app();
    let mut body = test_pad();
    body["latitude"] = json!("north");

    let response = post_json(app, "/api/drone-zones", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn create_with_malformed_json_returns_400() {
    let app = common::build_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/drone-zones")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = common::send(app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_after_creates_contains_each_zone_once() {
    let app = common::build_test_app();
    let mut created = HashSet::new();
    for i in 0..3 {
        let mut body = test_pad();
        body["title"] = json!(format!("Pad {i}"));
        let json = create(&app, body).await;
        created.insert(json["id"].as_str().unwrap().to_string());
    }

    let json = body_json(get(app, "/api/drone-zones").await).await;
    let ids: Vec<String> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|z| z["id"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(ids.len(), SEED_COUNT + 3);
    let unique: HashSet<_> = ids.iter().cloned().collect();
    assert_eq!(unique.len(), ids.len());
    assert!(created.is_subset(&unique));
}

#[tokio::test]
async fn list_filters_by_status_and_zone_type() {
    let app = common::build_test_app();
    create(&app, test_pad()).await;

    let pending = body_json(get(app.clone(), "/api/drone-zones?status=pending").await).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let restricted =
        body_json(get(app.clone(), "/api/drone-zones?zoneType=restricted").await).await;
    assert_eq!(restricted.as_array().unwrap().len(), 2);

    let response = get(app, "/api/drone-zones?status=approved").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patch_status_changes_only_status_and_updated_at() {
    let app = common::build_test_app();
    let created = create(&app, test_pad()).await;
    let id = created["id"].as_str().unwrap();

    let response = patch_json(
        app,
        &format!("/api/drone-zones/{id}"),
        json!({
            "status": "active",
            "id": "replaced",
            "createdAt": "2000-01-01T00:00:00Z"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;

    assert_eq!(updated["status"], "active");
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    for field in ["title", "latitude", "longitude", "reason", "details", "zoneType"] {
        assert_eq!(updated[field], created[field], "{field} changed");
    }
}

#[tokio::test]
async fn patch_seed_zone_refreshes_updated_at() {
    let app = common::build_test_app();
    let response = patch_json(
        app,
        "/api/drone-zones/4",
        json!({ "details": null, "title": "Fiordland NP" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Fiordland NP");
    assert!(json["details"].is_null());
    assert_ne!(json["updatedAt"], json["createdAt"]);
}

#[tokio::test]
async fn patch_unknown_zone_returns_404() {
    let app = common::build_test_app();
    let response = patch_json(app, "/api/drone-zones/missing", json!({ "status": "active" })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Zone not found");
}

#[tokio::test]
async fn patch_with_invalid_values_returns_400() {
    let app = common::build_test_app();

    let response = patch_json(app.clone(), "/api/drone-zones/1", json!({ "latitude": 123.0 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = patch_json(app.clone(), "/api/drone-zones/1", json!({ "status": "approved" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The zone is unchanged after rejected patches.
    let json = body_json(get(app, "/api/drone-zones/1").await).await;
    assert_eq!(json["status"], "active");
    assert_eq!(json["latitude"], -36.8485);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_then_get_returns_404() {
    let app = common::build_test_app();
    let created = create(&app, test_pad()).await;
    let uri = format!("/api/drone-zones/{}", created["id"].as_str().unwrap());

    let response = delete(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Zone deleted successfully");

    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Second delete reports the zone as missing.
    let response = delete(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stats_reflect_store_contents() {
    let app = common::build_test_app();
    create(&app, test_pad()).await;

    let response = get(app, "/api/drone-zones/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["total"], SEED_COUNT + 1);
    assert_eq!(json["byZoneType"]["restricted"], 2);
    assert_eq!(json["byZoneType"]["controlled"], 2);
    assert_eq!(json["byStatus"]["pending"], 1);
    assert_eq!(json["byStatus"]["active"], SEED_COUNT);
}
