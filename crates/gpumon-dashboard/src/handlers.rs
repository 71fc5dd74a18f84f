//! HTTP request handlers for the dashboard API.
//!
//! Each handler owns a cancellation token that fires when the handler
//! future is dropped, so a client that disconnects stops its in-flight
//! Prometheus queries.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use gpumon_metrics::clock::capture_timestamp;
use gpumon_metrics::{GpuMetrics, GpuProcess};
use gpumon_prom::QueryBackend;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{DashboardError, DashboardResult};
use crate::state::DashboardState;
use crate::types::{ApiResponse, HealthData};

/// Handle GET /api/healthz - probe Prometheus.
pub async fn healthz<B: QueryBackend>(
    State(state): State<Arc<DashboardState<B>>>,
) -> DashboardResult<Json<ApiResponse<HealthData>>> {
    state
        .metrics()
        .check_health(state.config().health_timeout)
        .await
        .map_err(DashboardError::PrometheusUnavailable)?;

    Ok(Json(ApiResponse::ok(
        HealthData::healthy(capture_timestamp()),
        "Service is healthy",
    )))
}

/// Handle GET /api/v1/gpu/metrics - per-GPU metrics.
pub async fn gpu_metrics<B: QueryBackend>(
    State(state): State<Arc<DashboardState<B>>>,
) -> DashboardResult<Json<ApiResponse<Vec<GpuMetrics>>>> {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let metrics = state
        .metrics()
        .get_gpu_metrics(&cancel)
        .await
        .map_err(DashboardError::Metrics)?;

    debug!(gpus = metrics.len(), "serving gpu metrics");
    Ok(Json(ApiResponse::ok(
        metrics,
        "GPU metrics retrieved successfully",
    )))
}

/// Handle GET /api/v1/gpu/processes - processes holding GPU memory.
pub async fn gpu_processes<B: QueryBackend>(
    State(state): State<Arc<DashboardState<B>>>,
) -> DashboardResult<Json<ApiResponse<Vec<GpuProcess>>>> {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let processes = state
        .metrics()
        .get_gpu_processes(&cancel)
        .await
        .map_err(DashboardError::Processes)?;

    debug!(processes = processes.len(), "serving gpu processes");
    Ok(Json(ApiResponse::ok(
        processes,
        "GPU processes retrieved successfully",
    )))
}
