//! HTTP client for the Prometheus query API.

use std::future::Future;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::{StatusCode, Url};
use tracing::debug;

use crate::error::{PromError, Result};
use crate::types::QueryResponse;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can answer an instant PromQL query.
///
/// [`PromClient`] is the production implementation; tests substitute fakes.
pub trait QueryBackend: Send + Sync + 'static {
    /// Execute `expr` and return the decoded, successful response.
    fn query(&self, expr: &str) -> impl Future<Output = Result<QueryResponse>> + Send;
}

/// Client for a single Prometheus server.
#[derive(Debug, Clone)]
pub struct PromClient {
    base_url: String,
    http: reqwest::Client,
}

impl PromClient {
    /// Create a client with the default 30 second request timeout.
    ///
    /// A trailing `/` on `base_url` is ignored.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| PromError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    /// The normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn query_url(&self) -> String {
        format!("{}/api/v1/query", self.base_url)
    }
}

impl QueryBackend for PromClient {
    async fn query(&self, expr: &str) -> Result<QueryResponse> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());

        debug!(query = %expr, "executing prometheus query");

        let resp = self
            .http
            .get(self.query_url())
            .query(&[("query", expr), ("time", &now.to_string())])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        if status != StatusCode::OK {
            return Err(PromError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let parsed: QueryResponse = serde_json::from_slice(&body)?;
        if !parsed.is_success() {
            return Err(PromError::QueryFailed {
                error_type: parsed.error_type,
                error: parsed.error,
            });
        }

        Ok(parsed)
    }
}
