//! Aggregation entry points used by the HTTP layer.

use std::sync::Arc;
use std::time::Duration;

use gpumon_prom::QueryBackend;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::clock::capture_timestamp;
use crate::error::{MetricsError, Result};
use crate::executor::execute_batch;
use crate::gpu::correlate_gpu_metrics;
use crate::process::correlate_gpu_processes;
use crate::queries::{GpuMetric, ProcessMetric};
use crate::types::{GpuMetrics, GpuProcess};

/// Default bound on one aggregation call.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Expression used to probe Prometheus reachability.
pub const HEALTH_QUERY: &str = "up";

/// Fans out the query tables against a backend and correlates the results.
///
/// Cheap to clone; clones share the backend.
#[derive(Debug)]
pub struct MetricsService<B> {
    backend: Arc<B>,
    timeout: Duration,
}

impl<B> Clone for MetricsService<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            timeout: self.timeout,
        }
    }
}

impl<B: QueryBackend> MetricsService<B> {
    /// Create a service using [`DEFAULT_QUERY_TIMEOUT`].
    pub fn new(backend: B) -> Self {
        Self::with_timeout(backend, DEFAULT_QUERY_TIMEOUT)
    }

    /// Create a service with a custom per-call timeout.
    pub fn with_timeout(backend: B, timeout: Duration) -> Self {
        Self {
            backend: Arc::new(backend),
            timeout,
        }
    }

    /// The per-call timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current metrics for every GPU, sorted by (node, GPU index).
    ///
    /// Fails if any of the metric queries fails, times out, or `cancel`
    /// fires. An empty cluster yields an empty vector.
    pub async fn get_gpu_metrics(&self, cancel: &CancellationToken) -> Result<Vec<GpuMetrics>> {
        let results = execute_batch(&self.backend, &GpuMetric::ALL, cancel, self.timeout).await?;
        let out = correlate_gpu_metrics(&results, &capture_timestamp());

        debug!(
            records = out.records.len(),
            missing_labels = out.skipped.missing_labels,
            invalid_values = out.skipped.invalid_values,
            "correlated gpu metrics"
        );
        Ok(out.records)
    }

    /// Current GPU processes, sorted by (node, GPU index, pid).
    pub async fn get_gpu_processes(&self, cancel: &CancellationToken) -> Result<Vec<GpuProcess>> {
        let results =
            execute_batch(&self.backend, &ProcessMetric::ALL, cancel, self.timeout).await?;
        let out = correlate_gpu_processes(&results, &capture_timestamp());

        debug!(
            records = out.records.len(),
            missing_labels = out.skipped.missing_labels,
            invalid_values = out.skipped.invalid_values,
            "correlated gpu processes"
        );
        Ok(out.records)
    }

    /// Probe the backend with a trivial query bounded by `timeout`.
    pub async fn check_health(&self, timeout: Duration) -> Result<()> {
        match tokio::time::timeout(timeout, self.backend.query(HEALTH_QUERY)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(source)) => Err(MetricsError::Query {
                metric: HEALTH_QUERY,
                source,
            }),
            Err(_) => Err(MetricsError::Timeout(timeout)),
        }
    }
}
