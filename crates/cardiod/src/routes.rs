//! API routes for cardiod

use crate::metrics::{OUTCOME_REJECTED, OUTCOME_UNAVAILABLE};
use crate::server::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use cardio_common::api::{
    ErrorResponse, FeaturesResponse, HealthResponse, HomeResponse, PatientProfile,
    PredictResponse,
};
use cardio_common::features::feature_descriptions;
use cardio_common::{predict, AttributeMap, CardioError};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

type AppStateArc = Arc<AppState>;

/// Maps pipeline errors onto the HTTP error contract
#[derive(Debug)]
pub struct ApiError(pub CardioError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_server_fault() {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::bare(self.0.to_string())),
            )
                .into_response()
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::failed(self.0.to_string())),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Info Routes
// ============================================================================

pub fn info_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(home))
        .route("/features", get(features))
}

async fn home() -> Json<HomeResponse> {
    Json(HomeResponse::default())
}

/// Expected features; empty when the model is not loaded
async fn features(State(state): State<AppStateArc>) -> Json<FeaturesResponse> {
    let features = state
        .artifacts
        .as_ref()
        .map(|store| store.feature_names().to_vec())
        .unwrap_or_default();

    Json(FeaturesResponse {
        features,
        descriptions: feature_descriptions(),
        example_input: PatientProfile::default(),
    })
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse::new(state.model_loaded()))
}

// ============================================================================
// Prediction Routes
// ============================================================================

pub fn prediction_routes() -> Router<AppStateArc> {
    Router::new().route("/predict", post(predict_risk))
}

/// The body is taken raw so the model check runs before JSON parsing and
/// malformed JSON gets the same 400 shape as every other input error.
async fn predict_risk(
    State(state): State<AppStateArc>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    let Some(store) = state.artifacts.as_ref() else {
        state.metrics.record_failure(OUTCOME_UNAVAILABLE);
        error!("[{}] Prediction refused: model not loaded", request_id);
        return Err(ApiError(CardioError::ModelNotLoaded));
    };

    let start = Instant::now();
    let result = AttributeMap::from_json_slice(&body).and_then(|attrs| predict(store, &attrs));

    match result {
        Ok(assessment) => {
            let elapsed = start.elapsed();
            state
                .metrics
                .record_success(assessment.risk_category, elapsed.as_secs_f64());
            info!(
                "[{}] {} (p={:.4}, {} recommendations) in {}us",
                request_id,
                assessment.risk_category,
                assessment.probability,
                assessment.recommendations.len(),
                elapsed.as_micros()
            );
            Ok(Json(PredictResponse::from(assessment)))
        }
        Err(e) => {
            state.metrics.record_failure(OUTCOME_REJECTED);
            warn!("[{}] Prediction rejected: {}", request_id, e);
            Err(ApiError(e))
        }
    }
}

// ============================================================================
// Metrics Routes
// ============================================================================

pub fn metrics_routes() -> Router<AppStateArc> {
    Router::new().route("/metrics", get(export_metrics))
}

async fn export_metrics(State(state): State<AppStateArc>) -> Response {
    match state.metrics.export() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to export metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
