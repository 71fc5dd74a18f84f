//! Fake Prometheus server for HTTP-level tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

/// Series answered by a fake Prometheus, keyed by query expression.
/// Unknown expressions get an HTTP 500.
pub type Series = HashMap<&'static str, Vec<Value>>;

/// One vector sample in Prometheus JSON form.
pub fn sample(labels: &[(&str, &str)], value: &str) -> Value {
    let metric: serde_json::Map<String, Value> = labels
        .iter()
        .map(|(k, v)| ((*k).to_string(), Value::from(*v)))
        .collect();
    json!({ "metric": metric, "value": [1_704_078_000.0, value] })
}

async fn answer(
    State(series): State<Arc<Series>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let expr = params.get("query").map_or("", String::as_str);
    match series.get(expr) {
        Some(result) => Json(json!({
            "status": "success",
            "data": { "resultType": "vector", "result": result },
        }))
        .into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "no such series").into_response(),
    }
}

/// Serve `series` on an ephemeral port and return its base URL.
pub async fn spawn_prometheus(series: Series) -> String {
    let router = Router::new()
        .route("/api/v1/query", get(answer))
        .with_state(Arc::new(series));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on.
pub async fn dead_prometheus() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A complete cluster: two GPUs on `node1`, one on `node2`, and one process.
pub fn cluster() -> Series {
    let gpu = |node: &str, id: &str, name: &str, v: &str| {
        sample(&[("hostname", node), ("gpu_id", id), ("gpu_name", name)], v)
    };
    let host = |node: &str, v: &str| sample(&[("hostname", node)], v);

    HashMap::from([
        ("up", vec![sample(&[("job", "prometheus")], "1")]),
        (
            "gpu_metrics_free_memory",
            vec![
                gpu("node2", "0", "NVIDIA A100", "40000"),
                gpu("node1", "1", "NVIDIA Tesla V100", "1024"),
                gpu("node1", "0", "NVIDIA Tesla V100", "8192"),
            ],
        ),
        (
            "gpu_metrics_used_memory",
            vec![gpu("node1", "0", "NVIDIA Tesla V100", "8192")],
        ),
        (
            "gpu_metrics_total_memory",
            vec![gpu("node1", "0", "NVIDIA Tesla V100", "16384")],
        ),
        (
            "gpu_metrics_utilization_percent",
            vec![gpu("node1", "0", "NVIDIA Tesla V100", "75")],
        ),
        (
            "gpu_metrics_temperature",
            vec![gpu("node1", "0", "NVIDIA Tesla V100", "65")],
        ),
        (
            "gpu_metrics_cpu_utilization",
            vec![host("node1", "25.5"), host("node2", "3")],
        ),
        ("gpu_metrics_memory_utilization", vec![host("node1", "50.0")]),
        (
            "gpu_process_gpu_memory",
            vec![
                sample(
                    &[
                        ("hostname", "node1"),
                        ("gpu_id", "1"),
                        ("pid", "1234"),
                        ("process_name", "python"),
                        ("user", "alice"),
                        ("command", "python train.py"),
                    ],
                    "2048",
                ),
                sample(
                    &[
                        ("hostname", "node1"),
                        ("gpu_id", "0"),
                        ("pid", "1234"),
                        ("process_name", "python"),
                        ("user", "alice"),
                        ("command", "python train.py"),
                    ],
                    "4096",
                ),
            ],
        ),
    ])
}
