//! GPU metric aggregation for the gpumon dashboard.
#![forbid(unsafe_code)]
//!
//! `gpumon-metrics` turns a fixed set of Prometheus instant queries into
//! per-GPU and per-process records:
//!
//! - **Query tables**: the PromQL expressions behind each logical metric
//! - **Executor**: runs a table concurrently, fail-fast, under one
//!   cancellation token and timeout
//! - **Correlators**: join independently fetched series by
//!   (node, GPU index) or (node, GPU index, pid)
//! - **Service**: the two entry points the HTTP layer calls
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use gpumon_metrics::{GpuMetric, correlate_gpu_metrics};
//! use gpumon_prom::{QueryResponse, Sample};
//!
//! let mut results = HashMap::new();
//! results.insert(
//!     GpuMetric::Utilization,
//!     QueryResponse::vector(vec![Sample::new(
//!         [("hostname", "node1"), ("gpu_id", "0"), ("gpu_name", "A100")],
//!         1_640_995_200.0,
//!         "75",
//!     )]),
//! );
//!
//! let out = correlate_gpu_metrics(&results, "2024/01/01 12:00:00");
//! assert_eq!(out.records.len(), 1);
//! assert_eq!(out.records[0].utilization, 75);
//! ```

#![warn(missing_docs)]

pub mod clock;
pub mod error;
pub mod executor;
pub mod gpu;
pub mod ordering;
pub mod process;
pub mod queries;
pub mod service;
pub mod types;

pub use error::{MetricsError, Result};
pub use executor::execute_batch;
pub use gpu::correlate_gpu_metrics;
pub use process::correlate_gpu_processes;
pub use queries::{GpuMetric, MetricKind, ProcessMetric};
pub use service::{DEFAULT_QUERY_TIMEOUT, HEALTH_QUERY, MetricsService};
pub use types::{Correlated, GpuMetrics, GpuProcess, SkipStats};
