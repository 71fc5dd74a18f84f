//! # gpumon-prom
//!
//! Minimal Prometheus HTTP API client used by the gpumon dashboard.
//!
//! Only instant queries (`/api/v1/query`) are supported. Responses are
//! decoded into [`QueryResponse`], whose samples carry the raw label set and
//! the `[timestamp, "value"]` pair exactly as Prometheus returns them; turning
//! samples into records is left to `gpumon-metrics`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gpumon_prom::{PromClient, QueryBackend};
//!
//! # async fn run() -> gpumon_prom::Result<()> {
//! let client = PromClient::new("http://localhost:9090/")?;
//! let response = client.query("gpu_metrics_utilization_percent").await?;
//!
//! for sample in response.samples() {
//!     println!("{:?} -> {:?}", sample.label("hostname"), sample.parse_value());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_TIMEOUT, PromClient, QueryBackend};
pub use error::{PromError, Result};
pub use types::{QueryData, QueryResponse, Sample};
