//! API integration tests
//!
//! Run against a live server with an empty database:
//! `cargo test --test api_tests -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to create an equipment item and return its ID
async fn create_equipment(client: &Client, name: &str, quantity: i32) -> String {
    let response = client
        .post(format!("{}/materiels", BASE_URL))
        .json(&json!({ "name": name, "quantity": quantity }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_str().expect("No equipment ID").to_string()
}

async fn delete(client: &Client, path: &str) {
    let _ = client.delete(format!("{}{}", BASE_URL, path)).send().await;
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_create_equipment_rejects_negative_quantity() {
    let client = Client::new();

    let response = client
        .post(format!("{}/materiels", BASE_URL))
        .json(&json!({ "name": "Broken", "quantity": -1 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_project_reservation_flow() {
    let client = Client::new();
    let drill = create_equipment(&client, "Drill", 5).await;

    // Reserve two drills for ten days
    let response = client
        .post(format!("{}/projets", BASE_URL))
        .json(&json!({
            "name": "Stage build",
            "start_date": "2024-01-01",
            "end_date": "2024-01-10",
            "equipment_usage": [{ "equipment_id": drill, "quantity": 2 }]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let project_id = body["id"].as_str().expect("No project ID").to_string();
    assert_eq!(body["start_date"], "2024-01-01T00:00:00Z");

    // Availability during the window
    let response = client
        .get(format!("{}/availability?date=2024-01-05", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let entry = body["entries"]
        .as_array()
        .expect("No entries")
        .iter()
        .find(|e| e["equipment_id"] == drill.as_str())
        .expect("Drill missing from availability")
        .clone();
    assert_eq!(entry["in_use"], 2);
    assert_eq!(entry["available"], 3);

    // Equipment still reserved cannot be deleted
    let response = client
        .delete(format!("{}/materiels/{}", BASE_URL, drill))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Cleanup
    delete(&client, &format!("/projets/{}", project_id)).await;
    delete(&client, &format!("/materiels/{}", drill)).await;
}

#[tokio::test]
#[ignore]
async fn test_create_project_with_unknown_equipment() {
    let client = Client::new();

    let response = client
        .post(format!("{}/projets", BASE_URL))
        .json(&json!({
            "name": "Ghost",
            "start_date": "2024-01-01",
            "equipment_usage": [{ "equipment_id": "does-not-exist", "quantity": 1 }]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_create_project_with_bad_dates() {
    let client = Client::new();

    let response = client
        .post(format!("{}/projets", BASE_URL))
        .json(&json!({
            "name": "Backwards",
            "start_date": "2024-01-10",
            "end_date": "2024-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_availability_rejects_bad_date() {
    let client = Client::new();

    let response = client
        .get(format!("{}/availability?date=someday", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_get_missing_project() {
    let client = Client::new();

    let response = client
        .get(format!("{}/projets/missing", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
