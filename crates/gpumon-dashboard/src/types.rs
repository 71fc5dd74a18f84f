//! JSON envelope and payload types for the dashboard API.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every API response.
///
/// Absent fields are omitted from the JSON rather than sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Public error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    /// A failed response with a public error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

/// Payload of `/api/healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthData {
    /// Always `"healthy"` when returned.
    pub status: String,
    /// Time of the probe.
    pub timestamp: String,
    /// Server version.
    pub version: String,
}

impl HealthData {
    /// A healthy probe result stamped at `timestamp`.
    pub fn healthy(timestamp: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: timestamp.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_error() {
        let resp = ApiResponse::ok(vec![1, 2], "done");

        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json, json!({"success": true, "data": [1, 2], "message": "done"}));
    }

    #[test]
    fn failure_omits_data_and_message() {
        let resp = ApiResponse::<()>::failure("Failed to retrieve GPU metrics");

        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(
            json,
            json!({"success": false, "error": "Failed to retrieve GPU metrics"})
        );
    }

    #[test]
    fn empty_data_is_an_array() {
        let resp = ApiResponse::ok(Vec::<u32>::new(), "ok");

        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["data"], json!([]));
    }

    #[test]
    fn health_data_shape() {
        let data = HealthData::healthy("2024/01/01 12:00:00");

        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["status"], "healthy");
        assert_eq!(json["timestamp"], "2024/01/01 12:00:00");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
