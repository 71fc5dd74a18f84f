//! Shared state for the dashboard server.

use gpumon_metrics::MetricsService;
use gpumon_prom::{PromClient, QueryBackend};

use crate::config::DashboardConfig;
use crate::error::DashboardResult;

/// Shared state for the dashboard server.
///
/// The backend is a [`PromClient`] outside of tests.
#[derive(Debug)]
pub struct DashboardState<B = PromClient> {
    config: DashboardConfig,
    metrics: MetricsService<B>,
}

impl DashboardState {
    /// Build the state, creating a Prometheus client for
    /// `config.prometheus_url`.
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        let client = PromClient::with_timeout(&config.prometheus_url, config.query_timeout)?;
        let metrics = MetricsService::with_timeout(client, config.query_timeout);
        Ok(Self { config, metrics })
    }
}

impl<B: QueryBackend> DashboardState<B> {
    /// Build the state around an existing backend.
    #[must_use]
    pub fn with_backend(config: DashboardConfig, backend: B) -> Self {
        let metrics = MetricsService::with_timeout(backend, config.query_timeout);
        Self { config, metrics }
    }

    /// Get the configuration.
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Get the metrics service.
    pub const fn metrics(&self) -> &MetricsService<B> {
        &self.metrics
    }
}
