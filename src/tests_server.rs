//! Router tests driven through `tower::ServiceExt::oneshot`

use crate::config::{CacheMode, Config};
use crate::server::router;
use crate::state::AppState;
use crate::store::fixtures::csv_file;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::path::Path;
use tower::ServiceExt;

const ROWS: &[&str] = &[
    "PROP123456,REG123456789,Ravi Kumar,Maharashtra,Mumbai,Andheri,Residential,urban,2025-04-10,2035-04-09,LEGAL",
    "PROP200,REG200,Meena Shah,Maharashtra,Pune,Haveli,Agricultural,rural,2024-11-02,,\"ILLEGAL (Boundary dispute, pending)\"",
];

fn state_for(path: &Path) -> std::sync::Arc<AppState> {
    AppState::new(
        Config::default()
            .with_data_file(Some(path.to_path_buf()))
            .with_cache(Some(CacheMode::Off)),
    )
}

async fn get(path: &Path, uri: &str) -> (StatusCode, Value) {
    let response = router(state_for(path))
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(Path::new("/nonexistent.csv"), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_property_found() {
    let file = csv_file(ROWS);
    let (status, body) = get(
        file.path(),
        "/property?propertyId=prop123456&registrationNumber=REG123456789",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Property Number"], "PROP123456");
    assert_eq!(body["Owner Name"], "Ravi Kumar");
    assert_eq!(body["Date Issued"], "2025-04-10");
    assert_eq!(body["Legal"], true);
    assert_eq!(body["Status Reason"], Value::Null);
}

#[tokio::test]
async fn test_property_illegal_reason() {
    let file = csv_file(ROWS);
    let (status, body) = get(
        file.path(),
        "/property?propertyId=PROP200&registrationNumber=REG200",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Legal"], false);
    assert_eq!(body["Status Reason"], "Boundary dispute, pending");
    assert_eq!(body["Date Expired"], Value::Null);
}

#[tokio::test]
async fn test_property_not_found() {
    let file = csv_file(ROWS);
    let (status, body) = get(
        file.path(),
        "/property?propertyId=PROP123456&registrationNumber=REG200",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Property not found");
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_property_missing_param() {
    let file = csv_file(ROWS);
    let (status, body) = get(file.path(), "/property?propertyId=PROP123456").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");
}

#[tokio::test]
async fn test_missing_data_file_unavailable() {
    let (status, body) = get(
        Path::new("/nonexistent/property-data.csv"),
        "/property?propertyId=PROP1&registrationNumber=REG1",
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "source_unavailable");
}

#[tokio::test]
async fn test_properties_search() {
    let file = csv_file(ROWS);
    let (status, body) = get(
        file.path(),
        "/properties?district=Mumbai&areaType=urban&regDateFrom=2025-01&regDateTo=2025-06",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["Property Number"], "PROP123456");
}

#[tokio::test]
async fn test_properties_capped_at_six() {
    let rows: Vec<String> = (0..10)
        .map(|i| {
            let day = i % 9 + 1;
            format!("P{i},R{i},Owner,MH,Thane,X,Residential,urban,2025-02-0{day},,LEGAL")
        })
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let file = csv_file(&rows);

    let (status, body) = get(file.path(), "/properties?district=thane").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_properties_empty_result() {
    let file = csv_file(ROWS);
    let (status, body) = get(file.path(), "/properties?district=Chennai").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_properties_requires_criteria() {
    let file = csv_file(ROWS);
    let (status, body) = get(file.path(), "/properties").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");
}

#[tokio::test]
async fn test_properties_malformed_month() {
    let file = csv_file(ROWS);
    let (status, _) = get(file.path(), "/properties?regDateFrom=2025-13").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_undecodable_query_is_json_error() {
    let file = csv_file(ROWS);
    let (status, body) =
        get(file.path(), "/properties?district=Pune&district=Thane").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");
}

#[tokio::test]
async fn test_cors_preflight() {
    let file = csv_file(ROWS);
    let response = router(state_for(file.path()))
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/properties")
                .header("Origin", "http://localhost:3000")
                .header("Access-Control-Request-Method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_properties_area_type_both_alone() {
    let file = csv_file(ROWS);
    let (status, body) = get(file.path(), "/properties?areaType=both").await;

    assert_eq!(status, StatusCode::OK);
    let numbers: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["Property Number"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(numbers, vec!["PROP123456", "PROP200"]);
}

#[tokio::test]
async fn test_skipped_rows_never_returned() {
    let file = csv_file(&[
        ROWS[0],
        // bad issue date; otherwise matches every query below
        "PROP300,REG300,Anil Desai,Maharashtra,Mumbai,Andheri,Residential,urban,2025-99-99,,LEGAL",
        // blank registration number
        "PROP400,,Kiran Patil,Maharashtra,Mumbai,Andheri,Residential,urban,2025-04-11,,LEGAL",
    ]);

    let (status, body) = get(file.path(), "/properties?district=Mumbai").await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["Property Number"], "PROP123456");

    let (status, _) = get(
        file.path(),
        "/property?propertyId=PROP300&registrationNumber=REG300",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
