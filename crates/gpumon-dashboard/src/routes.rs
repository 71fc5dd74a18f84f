//! Route configuration for the dashboard API.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use gpumon_prom::QueryBackend;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::DashboardConfig;
use crate::handlers::{gpu_metrics, gpu_processes, healthz};
use crate::state::DashboardState;

/// Create the dashboard API router.
pub fn create_router<B: QueryBackend>(state: Arc<DashboardState<B>>) -> Router {
    let cors = build_cors_layer(state.config());

    let api_routes = Router::new()
        .route("/healthz", get(healthz::<B>))
        .route("/v1/gpu/metrics", get(gpu_metrics::<B>))
        .route("/v1/gpu/processes", get(gpu_processes::<B>));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &DashboardConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}
