//! # gpumon-dashboard
//!
//! HTTP API for the GPU monitoring dashboard.
//!
//! Serves per-GPU metrics and per-process GPU memory usage, aggregated live
//! from Prometheus by `gpumon-metrics`, as JSON for a frontend table UI.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gpumon_dashboard::{DashboardConfig, DashboardServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DashboardConfig::default().with_prometheus_url("http://prometheus:9090");
//!     let server = DashboardServer::new(config.clone())?;
//!     server.serve(config.bind_addr).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/api/healthz` | GET | Prometheus reachability |
//! | `/api/v1/gpu/metrics` | GET | Per-GPU metrics, sorted by node and GPU index |
//! | `/api/v1/gpu/processes` | GET | GPU processes, sorted by node, GPU index and pid |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use server::DashboardServer;
pub use state::DashboardState;
pub use types::{ApiResponse, HealthData};
