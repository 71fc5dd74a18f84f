//! Concurrent, fail-fast execution of a query table.
//!
//! Every query runs on its own task and returns its response through the
//! task's join value, tagged with its slot index. The join loop is the only
//! writer of the result slots, so no lock is involved. The first failure
//! cancels the batch token and aborts the remaining tasks.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use gpumon_prom::{QueryBackend, QueryResponse};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{MetricsError, Result};
use crate::queries::MetricKind;

/// Run every query in `queries` concurrently against `backend`.
///
/// Returns one response per metric, or the first error observed. If
/// `cancel` is already cancelled no query is sent. Cancelling `cancel` while
/// the batch runs, or exceeding `timeout`, aborts all in-flight queries.
pub async fn execute_batch<B, K>(
    backend: &Arc<B>,
    queries: &[K],
    cancel: &CancellationToken,
    timeout: Duration,
) -> Result<HashMap<K, QueryResponse>>
where
    B: QueryBackend,
    K: MetricKind,
{
    if cancel.is_cancelled() {
        return Err(MetricsError::Cancelled);
    }

    let batch = cancel.child_token();
    // Cancels stragglers on every exit path, including early errors.
    let _batch_guard = batch.clone().drop_guard();

    let mut tasks = JoinSet::new();
    for (slot, kind) in queries.iter().copied().enumerate() {
        let backend = Arc::clone(backend);
        let token = batch.clone();
        tasks.spawn(async move {
            let outcome = tokio::select! {
                () = token.cancelled() => Err(MetricsError::Cancelled),
                res = backend.query(kind.expr()) => res.map_err(|source| MetricsError::Query {
                    metric: kind.name(),
                    source,
                }),
            };
            (slot, outcome)
        });
    }

    let mut slots: Vec<Option<QueryResponse>> = (0..queries.len()).map(|_| None).collect();

    let collect = async {
        while let Some(joined) = tasks.join_next().await {
            let (slot, outcome) = joined.map_err(|e| MetricsError::Join {
                reason: e.to_string(),
            })?;
            slots[slot] = Some(outcome?);
        }
        Ok::<(), MetricsError>(())
    };

    let finished = match tokio::time::timeout(timeout, collect).await {
        Ok(res) => res,
        Err(_) => Err(MetricsError::Timeout(timeout)),
    };

    if let Err(err) = finished {
        warn!(error = %err, queries = queries.len(), "query batch failed");
        batch.cancel();
        tasks.abort_all();
        return Err(err);
    }

    debug!(queries = queries.len(), "query batch complete");

    Ok(queries
        .iter()
        .copied()
        .zip(slots)
        .filter_map(|(kind, resp)| resp.map(|r| (kind, r)))
        .collect())
}
