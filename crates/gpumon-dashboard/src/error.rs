//! Error types for the dashboard server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gpumon_metrics::MetricsError;
use gpumon_prom::PromError;
use thiserror::Error;
use tracing::warn;

use crate::types::ApiResponse;

/// Result type alias for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Errors that can occur in the dashboard server.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// The Prometheus client could not be built.
    #[error("invalid prometheus client configuration: {0}")]
    Client(#[from] PromError),

    /// The health probe against Prometheus failed.
    #[error("prometheus health check failed: {0}")]
    PrometheusUnavailable(#[source] MetricsError),

    /// Aggregating GPU metrics failed.
    #[error("gpu metrics aggregation failed: {0}")]
    Metrics(#[source] MetricsError),

    /// Aggregating GPU processes failed.
    #[error("gpu process aggregation failed: {0}")]
    Processes(#[source] MetricsError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    /// Status code and the message shown to API clients.
    ///
    /// Internal details stay in the logs.
    pub fn public_parts(&self) -> (StatusCode, &'static str) {
        match self {
            Self::PrometheusUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Prometheus connection failed")
            }
            Self::Metrics(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve GPU metrics",
            ),
            Self::Processes(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve GPU processes",
            ),
            Self::BindFailed(_, _) | Self::Client(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, public) = self.public_parts();
        warn!(error = %self, status = status.as_u16(), "request failed");

        (status, Json(ApiResponse::<()>::failure(public))).into_response()
    }
}
