//! Dashboard server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::routes::create_router;
use crate::state::DashboardState;

/// HTTP server for the GPU dashboard API.
#[derive(Debug, Clone)]
pub struct DashboardServer {
    state: Arc<DashboardState>,
}

impl DashboardServer {
    /// Create a dashboard server from its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the Prometheus URL is unusable.
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        let state = Arc::new(DashboardState::new(config)?);
        Ok(Self { state })
    }

    /// Get the dashboard state for external access.
    #[must_use]
    pub fn state(&self) -> Arc<DashboardState> {
        Arc::clone(&self.state)
    }

    /// Start the dashboard server and listen for connections.
    ///
    /// This method runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> DashboardResult<()> {
        self.serve_with_shutdown(addr, std::future::pending()).await
    }

    /// Start the dashboard server with graceful shutdown support.
    ///
    /// The server will shut down when the provided future completes.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, addr: SocketAddr, shutdown: F) -> DashboardResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| DashboardError::BindFailed(addr, e))?;

        let local = listener.local_addr().unwrap_or(addr);
        info!(
            addr = %local,
            prometheus = %self.state.config().prometheus_url,
            "dashboard server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| DashboardError::Internal(e.to_string()))?;

        info!("dashboard server shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    ///
    /// Useful for testing or embedding in another server.
    pub fn router(&self) -> axum::Router {
        create_router(self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cluster, spawn_prometheus};
    use std::time::Duration;

    async fn make_test_server() -> DashboardServer {
        let url = spawn_prometheus(cluster()).await;
        DashboardServer::new(DashboardConfig::default().with_prometheus_url(url)).unwrap()
    }

    #[test]
    fn test_server_rejects_bad_prometheus_url() {
        let config = DashboardConfig::default().with_prometheus_url("::not-a-url");

        assert!(matches!(
            DashboardServer::new(config),
            Err(DashboardError::Client(_))
        ));
    }

    #[tokio::test]
    async fn test_server_clone_shares_state() {
        let server = make_test_server().await;
        let cloned = server.clone();

        assert!(Arc::ptr_eq(&server.state(), &cloned.state()));
    }

    #[tokio::test]
    async fn test_serve_with_shutdown() {
        let server = make_test_server().await;
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let server_handle = tokio::spawn(async move {
            server
                .serve_with_shutdown(addr, async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = shutdown_tx.send(());

        let result = tokio::time::timeout(Duration::from_secs(1), server_handle)
            .await
            .unwrap()
            .unwrap();

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_serve_bind_failure() {
        let server = make_test_server().await;

        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let result = server.serve(addr).await;

        assert!(matches!(result, Err(DashboardError::BindFailed(a, _)) if a == addr));
    }

    #[tokio::test]
    async fn test_serves_real_http() {
        let server = make_test_server().await;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = server.router();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "GET /api/v1/gpu/processes HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"
        );
        tokio::io::AsyncWriteExt::write_all(&mut stream, request.as_bytes())
            .await
            .unwrap();
        let mut response = String::new();
        tokio::io::AsyncReadExt::read_to_string(&mut stream, &mut response)
            .await
            .unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("\"pid\":1234"));
    }
}
