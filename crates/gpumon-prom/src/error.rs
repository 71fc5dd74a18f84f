//! Error types for Prometheus queries.

use thiserror::Error;

/// Result type alias for Prometheus client operations.
pub type Result<T> = std::result::Result<T, PromError>;

/// Errors that can occur while querying Prometheus.
#[derive(Debug, Error)]
pub enum PromError {
    /// The base URL could not be used to build a query URL.
    #[error("invalid prometheus url '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request could not be sent or the body could not be read.
    #[error("executing request: {0}")]
    Transport(#[from] reqwest::Error),

    /// Prometheus answered with a non-200 HTTP status.
    #[error("prometheus API error: status {status}, body: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The response body was not a valid query response.
    #[error("unmarshaling response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Prometheus reported the query itself as failed.
    #[error("prometheus query failed: {error_type} - {error}")]
    QueryFailed {
        /// Prometheus `errorType` field.
        error_type: String,
        /// Prometheus `error` field.
        error: String,
    },
}
