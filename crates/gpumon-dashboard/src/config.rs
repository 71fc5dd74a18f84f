//! Dashboard server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use gpumon_metrics::DEFAULT_QUERY_TIMEOUT;

/// Default Prometheus base URL.
pub const DEFAULT_PROMETHEUS_URL: &str = "http://localhost:9090";

/// Default bound on the health probe.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the dashboard server.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// Base URL of the Prometheus server.
    pub prometheus_url: String,
    /// Bound on one metrics or processes aggregation.
    pub query_timeout: Duration,
    /// Bound on the health probe.
    pub health_timeout: Duration,
    /// CORS allowed origins (empty means all).
    pub cors_origins: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            prometheus_url: DEFAULT_PROMETHEUS_URL.to_string(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            cors_origins: Vec::new(),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration with the specified bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Self::default()
        }
    }

    /// Set the Prometheus base URL.
    #[must_use]
    pub fn with_prometheus_url(mut self, url: impl Into<String>) -> Self {
        self.prometheus_url = url.into();
        self
    }

    /// Set the aggregation timeout.
    #[must_use]
    pub const fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Set the health probe timeout.
    #[must_use]
    pub const fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Add a CORS allowed origin.
    #[must_use]
    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origins.push(origin.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.prometheus_url, "http://localhost:9090");
        assert_eq!(config.query_timeout, Duration::from_secs(30));
        assert_eq!(config.health_timeout, Duration::from_secs(5));
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_config_new() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 9000);
        let config = DashboardConfig::new(addr);

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.prometheus_url, DEFAULT_PROMETHEUS_URL);
    }

    #[test]
    fn test_config_builder() {
        let config = DashboardConfig::default()
            .with_prometheus_url("http://prometheus:9090")
            .with_query_timeout(Duration::from_secs(10))
            .with_health_timeout(Duration::from_secs(2))
            .with_cors_origin("http://localhost:3000")
            .with_cors_origin("https://gpu.example.com");

        assert_eq!(config.prometheus_url, "http://prometheus:9090");
        assert_eq!(config.query_timeout, Duration::from_secs(10));
        assert_eq!(config.health_timeout, Duration::from_secs(2));
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.cors_origins.contains(&"http://localhost:3000".to_string()));
    }
}
