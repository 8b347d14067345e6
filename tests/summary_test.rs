mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn summary_counts_sum_to_total() {
    let app = TestApp::new().await;
    let svc = &app.state.item_service;

    let a = app.create_item(json!({ "name": "A" })).await;
    let b = app.create_item(json!({ "name": "B" })).await;
    app.create_item(json!({ "name": "C" })).await;

    let a_id = a["id"].as_str().unwrap().parse().unwrap();
    let b_id = b["id"].as_str().unwrap().parse().unwrap();
    svc.check_out(a_id).await.unwrap();
    svc.retire(b_id).await.unwrap();

    let response = app.request(Method::GET, "/api/v1/summary", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = response_json(response).await;

    let counts = summary["counts_by_status"].as_object().unwrap();
    assert_eq!(counts.len(), 4, "every status key is present");
    assert_eq!(counts["available"], 1);
    assert_eq!(counts["checked_out"], 1);
    assert_eq!(counts["maintenance"], 0);
    assert_eq!(counts["retired"], 1);

    let total: u64 = counts.values().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn alerts_respect_window_and_exclude_retired() {
    let app = TestApp::new().await;
    let svc = &app.state.item_service;
    let today = Utc::now().date_naive();

    // Due in 3 days: inside the default 7-day window
    let soon = app.create_item(json!({ "name": "Soon" })).await;
    let soon_id = soon["id"].as_str().unwrap().parse().unwrap();
    svc.schedule_maintenance(soon_id, today + Duration::days(3), None)
        .await
        .unwrap();

    // Due in 30 days: outside the window
    let later = app.create_item(json!({ "name": "Later" })).await;
    let later_id = later["id"].as_str().unwrap().parse().unwrap();
    svc.schedule_maintenance(later_id, today + Duration::days(30), None)
        .await
        .unwrap();

    // Same due date as "Soon" but retired: excluded
    let gone = app.create_item(json!({ "name": "Gone" })).await;
    let gone_id = gone["id"].as_str().unwrap().parse().unwrap();
    svc.schedule_maintenance(gone_id, today + Duration::days(3), None)
        .await
        .unwrap();
    svc.retire(gone_id).await.unwrap();

    let response = app.request(Method::GET, "/api/v1/summary", None).await;
    let summary = response_json(response).await;
    let alerts = summary["maintenance_alerts"].as_array().unwrap();

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["name"], "Soon");
}

#[tokio::test]
async fn alerts_sorted_by_due_date() {
    let app = TestApp::new().await;
    let svc = &app.state.item_service;
    let today = Utc::now().date_naive();

    for (name, days) in [("Second", 5), ("First", 2), ("Third", 6)] {
        let item = app.create_item(json!({ "name": name })).await;
        let id = item["id"].as_str().unwrap().parse().unwrap();
        svc.schedule_maintenance(id, today + Duration::days(days), None)
            .await
            .unwrap();
    }

    let response = app.request(Method::GET, "/api/v1/summary", None).await;
    let summary = response_json(response).await;
    let names: Vec<&str> = summary["maintenance_alerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn map_items_require_both_coordinates() {
    let app = TestApp::new().await;

    app.create_item(json!({ "name": "Plotted", "gps_lat": 48.85, "gps_lng": 2.35 }))
        .await;
    app.create_item(json!({ "name": "Homeless" })).await;

    let response = app.request(Method::GET, "/api/v1/map/items", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let markers = response_json(response).await;
    let markers = markers.as_array().unwrap();

    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0]["name"], "Plotted");
    assert_eq!(markers[0]["gps_lat"], 48.85);
    assert_eq!(markers[0]["gps_lng"], 2.35);
    assert!(markers[0]["id"].is_string());
}

#[tokio::test]
async fn lookup_names_deduplicate_and_sort() {
    let app = TestApp::new().await;

    app.create_item(json!({ "name": "A", "category": "heavy", "location": "North yard" }))
        .await;
    app.create_item(json!({ "name": "B", "category": "heavy", "location": "East yard" }))
        .await;
    app.create_item(json!({ "name": "C", "category": "attachments" }))
        .await;

    let response = app.request(Method::GET, "/api/v1/categories", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let categories = response_json(response).await;
    assert_eq!(categories, json!(["attachments", "heavy"]));

    let response = app.request(Method::GET, "/api/v1/locations", None).await;
    let locations = response_json(response).await;
    assert_eq!(locations, json!(["East yard", "North yard"]));
}
