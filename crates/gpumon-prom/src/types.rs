//! Prometheus instant-query response types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Status string Prometheus uses for successful queries.
pub const STATUS_SUCCESS: &str = "success";

/// Top-level body of `/api/v1/query`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// `"success"` or `"error"`.
    pub status: String,
    /// Result payload; empty on error responses.
    #[serde(default)]
    pub data: QueryData,
    /// Error message when `status` is `"error"`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
    /// Error class when `status` is `"error"`.
    #[serde(
        default,
        rename = "errorType",
        skip_serializing_if = "String::is_empty"
    )]
    pub error_type: String,
}

impl QueryResponse {
    /// Build a successful vector response from samples.
    #[must_use]
    pub fn vector(result: Vec<Sample>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data: QueryData {
                result_type: "vector".to_string(),
                result,
            },
            ..Self::default()
        }
    }

    /// Whether Prometheus reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// The result samples.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.data.result
    }
}

/// The `data` object of a query response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryData {
    /// `vector`, `matrix`, `scalar` or `string`.
    #[serde(default, rename = "resultType")]
    pub result_type: String,
    /// Series samples.
    #[serde(default)]
    pub result: Vec<Sample>,
}

/// One labeled observation from an instant vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Label set of the series.
    #[serde(default)]
    pub metric: HashMap<String, String>,
    /// `[unix_timestamp, "value"]`. Kept loosely typed so a malformed pair
    /// only affects this sample.
    #[serde(default)]
    pub value: Vec<serde_json::Value>,
}

impl Sample {
    /// Build a sample from labels, a timestamp and a raw value string.
    #[must_use]
    pub fn new<K, V>(labels: impl IntoIterator<Item = (K, V)>, ts: f64, value: &str) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            metric: labels
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            value: vec![ts.into(), value.into()],
        }
    }

    /// Label value, or `""` when the label is absent.
    #[must_use]
    pub fn label(&self, name: &str) -> &str {
        self.metric.get(name).map_or("", String::as_str)
    }

    /// Sample timestamp in unix seconds, if present.
    #[must_use]
    pub fn timestamp(&self) -> Option<f64> {
        self.value.first().and_then(serde_json::Value::as_f64)
    }

    /// Raw value string, if the pair is well formed.
    #[must_use]
    pub fn raw_value(&self) -> Option<&str> {
        if self.value.len() < 2 {
            return None;
        }
        self.value[1].as_str()
    }

    /// Value parsed as a base-10 float. `None` for a missing or unparseable
    /// value.
    #[must_use]
    pub fn parse_value(&self) -> Option<f64> {
        self.raw_value()?.parse().ok()
    }
}
