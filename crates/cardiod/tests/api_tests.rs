//! HTTP contract tests for cardiod.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`, with and
//! without loaded artifacts.

use approx::assert_relative_eq;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use cardio_common::{ArtifactPaths, ArtifactStore};
use cardiod::config::CardiodConfig;
use cardiod::metrics::PredictionMetrics;
use cardiod::server::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

fn bundled_store() -> ArtifactStore {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts");
    ArtifactStore::load(&ArtifactPaths::in_dir(dir)).expect("bundled artifacts load")
}

fn app(artifacts: Option<ArtifactStore>) -> Router {
    let metrics = PredictionMetrics::new().unwrap();
    let state = Arc::new(AppState::new(artifacts, metrics));
    build_router(state, &CardiodConfig::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_predict(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::post("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn example_patient() -> Value {
    json!({
        "gender": 2, "height": 170, "weight": 70, "ap_hi": 120, "ap_lo": 80,
        "cholesterol": 1, "gluc": 1, "smoke": 0, "alco": 0, "active": 1, "age": 50
    })
}

#[tokio::test]
async fn test_home() {
    let (status, body) = get_json(app(None), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cardiovascular Disease Prediction API");
    assert_eq!(body["status"], "running");
    assert!(body["endpoints"]["/predict"].is_string());
}

#[tokio::test]
async fn test_health_reports_model_state() {
    let (status, body) = get_json(app(None), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "model_loaded": false}));

    let (_, body) = get_json(app(Some(bundled_store())), "/health").await;
    assert_eq!(body["model_loaded"], true);
}

#[tokio::test]
async fn test_predict_without_model_is_500() {
    let (status, body) = post_predict(app(None), example_patient().to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Model not loaded"}));
}

#[tokio::test]
async fn test_predict_without_model_ignores_malformed_body() {
    let (status, _) = post_predict(app(None), "{broken").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_predict_example_patient() {
    let (status, body) = post_predict(app(Some(bundled_store())), example_patient().to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let probability = body["probability"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&probability));

    assert_eq!(body["features_values"]["age_years"], json!(50.0));
    assert_relative_eq!(
        body["features_values"]["bmi"].as_f64().unwrap(),
        24.22,
        epsilon = 0.01
    );

    let features_used = body["features_used"].as_array().unwrap();
    assert_eq!(features_used.len(), 12);
    assert_eq!(features_used[0], "gender");

    let category = body["risk_category"].as_str().unwrap();
    assert!(["Low Risk", "Moderate Risk", "High Risk", "Very High Risk"].contains(&category));
    let prediction = body["prediction"].as_str().unwrap();
    assert!(prediction == "High Risk" || prediction == "Low Risk");
    assert!(!body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_features_values_follow_model_order() {
    // No content-type header: the body is read raw either way
    let request = Request::post("/predict")
        .body(Body::from(example_patient().to_string()))
        .unwrap();
    let (status, raw) = send(app(Some(bundled_store())), request).await;
    assert_eq!(status, StatusCode::OK);
    let raw = String::from_utf8(raw).unwrap();

    let gender_at = raw.find("\"gender\":2.0").unwrap();
    let age_at = raw.find("\"age_years\":50.0").unwrap();
    let bmi_at = raw.find("\"bmi\":").unwrap();
    assert!(gender_at < age_at && age_at < bmi_at);
}

#[tokio::test]
async fn test_predict_rejects_text_attribute() {
    let (status, body) = post_predict(
        app(Some(bundled_store())),
        json!({"height": "170", "weight": 70}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("height"));
}

#[tokio::test]
async fn test_predict_rejects_malformed_json() {
    let (status, body) = post_predict(app(Some(bundled_store())), "{broken").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_predict_rejects_zero_height() {
    let (status, body) = post_predict(
        app(Some(bundled_store())),
        json!({"height": 0, "weight": 70}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_predict_empty_object_uses_defaults() {
    let (status, body) = post_predict(app(Some(bundled_store())), "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["features_values"]["age_years"], json!(50.0));
    assert_eq!(body["features_values"]["bmi"], json!(25.0));
    assert_eq!(body["features_values"]["gender"], json!(0.0));
}

#[tokio::test]
async fn test_features_endpoint() {
    let (status, body) = get_json(app(Some(bundled_store())), "/features").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["features"].as_array().unwrap().len(), 12);
    assert_eq!(body["example_input"]["age"], 50);
    assert!(body["descriptions"]["bmi"].is_string());

    let (_, body) = get_json(app(None), "/features").await;
    assert_eq!(body["features"], json!([]));
}

#[tokio::test]
async fn test_metrics_endpoint_counts_predictions() {
    let metrics = PredictionMetrics::new().unwrap();
    let state = Arc::new(AppState::new(Some(bundled_store()), metrics));
    let router = build_router(state, &CardiodConfig::default());

    let (status, _) = post_predict(router.clone(), example_patient().to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::get("/metrics").body(Body::empty()).unwrap();
    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("cardio_predictions_total{outcome=\"success\"} 1"));
    assert!(text.contains("cardio_model_loaded 1"));
}

#[tokio::test]
async fn test_oversized_body_is_refused() {
    let mut config = CardiodConfig::default();
    config.server.max_body_bytes = 16;
    let state = Arc::new(AppState::new(
        Some(bundled_store()),
        PredictionMetrics::new().unwrap(),
    ));
    let router = build_router(state, &config);

    let body = example_patient().to_string();
    let request = Request::post("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    let (status, _) = send(router, request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
