//! Error types for the gpumon-metrics crate.

use std::time::Duration;

use gpumon_prom::PromError;
use thiserror::Error;

/// Errors that fail a whole aggregation call.
///
/// Malformed individual samples never surface here; they are counted in
/// [`SkipStats`](crate::types::SkipStats) instead.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// One of the batch queries failed.
    #[error("query {metric} failed: {source}")]
    Query {
        /// Logical metric name of the failed query.
        metric: &'static str,
        /// Underlying client error.
        #[source]
        source: PromError,
    },

    /// The caller cancelled the batch.
    #[error("query batch cancelled")]
    Cancelled,

    /// The batch did not finish within its timeout.
    #[error("query batch timed out after {0:?}")]
    Timeout(Duration),

    /// A query task panicked or was aborted.
    #[error("query task failed: {reason}")]
    Join {
        /// Description from the runtime.
        reason: String,
    },
}

/// Result type for metrics operations.
pub type Result<T> = std::result::Result<T, MetricsError>;
