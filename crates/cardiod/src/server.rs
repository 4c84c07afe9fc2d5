//! HTTP server for cardiod

use crate::config::{CardiodConfig, CorsConfig};
use crate::metrics::PredictionMetrics;
use crate::routes;
use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use axum::Router;
use cardio_common::ArtifactStore;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across handlers
pub struct AppState {
    /// `None` when the artifacts failed to load at startup
    pub artifacts: Option<ArtifactStore>,
    pub metrics: PredictionMetrics,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(artifacts: Option<ArtifactStore>, metrics: PredictionMetrics) -> Self {
        metrics.set_model_loaded(artifacts.is_some());
        Self {
            artifacts,
            metrics,
            start_time: Instant::now(),
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.artifacts.is_some()
    }
}

/// Assemble routes and middleware
pub fn build_router(state: Arc<AppState>, config: &CardiodConfig) -> Router {
    Router::new()
        .merge(routes::info_routes())
        .merge(routes::health_routes())
        .merge(routes::prediction_routes())
        .merge(routes::metrics_routes())
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.server.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

/// Run the HTTP server
pub async fn run(state: AppState, config: &CardiodConfig) -> Result<()> {
    let app = build_router(Arc::new(state), config);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully");
}
