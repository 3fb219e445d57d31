//! HTTP-level tests for the Kit Optima service.
//!
//! Run with: `cargo test --features service --test service`

#![cfg(feature = "service")]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use kit_optima::{create_router, ServiceState, WearLimitTable};

fn app() -> Router {
    create_router(ServiceState::default())
}

async fn send(app: Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn sample_items() -> Value {
    json!({
        "items": [
            { "element_id": "SLAB-1", "material": "Plywood", "length": 1.8, "width": 1.8,
              "quantity": 5, "start_date": "2026-03-01", "end_date": "2026-03-10" },
            { "element_id": "SLAB-2", "material": "Plywood", "length": 1.8, "width": 1.8,
              "quantity": 5, "start_date": "2026-03-01", "end_date": "2026-03-10",
              "area_sqm": 3.24, "duration_days": 9 },
            { "element_id": "COL-1", "material": "Aluform", "length": 3.0, "width": 0.6,
              "quantity": 40, "start_date": "2026-03-04", "end_date": "2026-03-06" }
        ]
    })
}

#[tokio::test]
async fn test_optimize_kitting_success() {
    let (status, body) = send(
        app(),
        "POST",
        "/api/optimize-kitting",
        Some(sample_items().to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["original_boq_items"], 50);
    assert_eq!(body["optimized_kits_required"], 50);
    assert_eq!(body["total_repetition_factor"], 1.0);
    assert_eq!(body["estimated_cost_savings_percent"], 0.0);
    assert!(body["execution_time_ms"].as_str().unwrap().ends_with(" ms"));

    let kits = body["kit_details"].as_array().unwrap();
    assert_eq!(kits.len(), 2);
    assert_eq!(kits[0]["material"], "Aluform");
    assert_eq!(kits[0]["dimensions"], "3.0x0.6");
    assert_eq!(kits[0]["required_qty"], 40);
    assert_eq!(kits[1]["material"], "Plywood");
    assert_eq!(kits[1]["required_qty"], 10);
    assert_eq!(kits[1]["repetition_count"], 1.0);
    assert_eq!(kits[1]["used_in_elements"], json!(["SLAB-1", "SLAB-2"]));
}

#[tokio::test]
async fn test_unprefixed_route() {
    let (status, _) = send(app(), "POST", "/optimize-kitting", Some(sample_items().to_string())).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_json_is_client_error() {
    let (status, body) = send(
        app(),
        "POST",
        "/api/optimize-kitting",
        Some("{ \"items\": [ oops".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_INPUT");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_empty_items_is_client_error() {
    let (status, body) = send(
        app(),
        "POST",
        "/api/optimize-kitting",
        Some(json!({ "items": [] }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMPTY_INPUT");
}

#[tokio::test]
async fn test_invalid_date_is_unprocessable() {
    let mut payload = sample_items();
    payload["items"][2]["start_date"] = json!("04-03-2026");

    let (status, body) = send(app(), "POST", "/api/optimize-kitting", Some(payload.to_string())).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_DATE");
    assert_eq!(body["element_id"], "COL-1");
    assert!(body["error"].as_str().unwrap().contains("COL-1"));
    assert!(body.get("kit_details").is_none());
}

#[tokio::test]
async fn test_reversed_range_is_unprocessable() {
    let mut payload = sample_items();
    payload["items"][0]["end_date"] = json!("2026-02-20");

    let (status, body) = send(app(), "POST", "/api/optimize-kitting", Some(payload.to_string())).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_DATE_RANGE");
}

#[tokio::test]
async fn test_configured_wear_table_is_used() {
    let payload = json!({
        "items": (1..=3).map(|week| json!({
            "element_id": format!("PIER-{}", week),
            "material": "Steel", "length": 2.4, "width": 1.2, "quantity": 4,
            "start_date": format!("2026-03-{:02}", week * 7),
            "end_date": format!("2026-03-{:02}", week * 7 + 2),
        })).collect::<Vec<_>>()
    });

    // Default Steel limit 10: peak 4 dominates ceil(12/10) = 2.
    let (_, body) = send(app(), "POST", "/api/optimize-kitting", Some(payload.to_string())).await;
    assert_eq!(body["kit_details"][0]["required_qty"], 4);

    // Steel limit 2: wear minimum ceil(12/2) = 6 dominates.
    let limits = WearLimitTable::default().with_material("Steel", 2);
    let app = create_router(ServiceState::new(limits));
    let (status, body) = send(app, "POST", "/api/optimize-kitting", Some(payload.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kit_details"][0]["required_qty"], 6);
    assert_eq!(body["kit_details"][0]["repetition_count"], 2.0);
}

#[tokio::test]
async fn test_clean_boq() {
    let payload = json!({
        "rows": [
            { "element_id": " z1-slab-0001 ", "material": "Plywood", "length": 1.801, "width": 1.8,
              "quantity": null, "start_date": "2026-03-01", "end_date": "2026-03-04" },
            { "element_id": "z1-slab-0002", "material": "Plywood", "length": 1.8, "width": 1.8,
              "quantity": 5, "start_date": "2026-03-09", "end_date": "2026-03-04" }
        ]
    });

    let (status, body) = send(app(), "POST", "/api/clean-boq", Some(payload.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["element_id"], "Z1-SLAB-0001");
    assert_eq!(body["items"][0]["quantity"], 1);
    assert_eq!(body["summary"]["dropped_rows"], 1);
}

#[tokio::test]
async fn test_health() {
    for uri in ["/health", "/api/health"] {
        let (status, body) = send(app(), "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "kit-optima");
        assert_eq!(body["materials"], 2);
    }
}
