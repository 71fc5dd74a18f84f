//! Per-GPU correlation.
//!
//! Samples from the GPU-scoped series are joined on (hostname, `gpu_id`).
//! Host CPU and memory utilization only carry a hostname, so they are
//! collected into a side table first and copied onto every GPU of that
//! host once all samples have been seen.

use std::collections::HashMap;

use gpumon_prom::{QueryResponse, Sample};

use crate::ordering::sort_gpu_metrics;
use crate::queries::{GPU_ID_LABEL, GPU_NAME_LABEL, GpuMetric, HOSTNAME_LABEL};
use crate::types::{Correlated, GpuMetrics, SkipStats};

/// Host-level utilization, keyed by hostname.
#[derive(Debug, Default, Clone, Copy)]
struct NodeUtilization {
    cpu: f64,
    memory: f64,
}

/// Join GPU metric responses into one record per (node, GPU index).
///
/// Samples without a hostname, with a missing or non-integer `gpu_id` on a
/// GPU-scoped series, or with an unparseable value are skipped and counted.
/// A metric missing from `results` simply contributes nothing. Records are
/// returned sorted by (node name, GPU index).
#[must_use]
pub fn correlate_gpu_metrics(
    results: &HashMap<GpuMetric, QueryResponse>,
    captured_at: &str,
) -> Correlated<GpuMetrics> {
    let mut skipped = SkipStats::default();
    let mut gpus: HashMap<(String, u32), GpuMetrics> = HashMap::new();
    let mut nodes: HashMap<String, NodeUtilization> = HashMap::new();

    for metric in GpuMetric::ALL {
        let Some(response) = results.get(&metric) else {
            continue;
        };

        for sample in response.samples() {
            let node_name = sample.label(HOSTNAME_LABEL);
            if node_name.is_empty() {
                skipped.missing_labels += 1;
                continue;
            }

            let Some(value) = sample.parse_value() else {
                skipped.invalid_values += 1;
                continue;
            };

            if metric.is_node_scoped() {
                let util = nodes.entry(node_name.to_string()).or_default();
                if metric == GpuMetric::CpuUtilization {
                    util.cpu = value;
                } else {
                    util.memory = value;
                }
                continue;
            }

            let Some(gpu_index) = parse_id(sample.label(GPU_ID_LABEL)) else {
                skipped.missing_labels += 1;
                continue;
            };

            let record = gpus
                .entry((node_name.to_string(), gpu_index))
                .or_insert_with(|| new_record(sample, node_name, gpu_index, captured_at));

            let field = value as i64;
            match metric {
                GpuMetric::MemoryFree => record.memory_free = field,
                GpuMetric::MemoryUsed => record.memory_used = field,
                GpuMetric::MemoryTotal => record.memory_total = field,
                GpuMetric::Utilization => record.utilization = field,
                GpuMetric::Temperature => record.temperature = field,
                // handled above
                GpuMetric::CpuUtilization | GpuMetric::MemoryUtilization => {}
            }
        }
    }

    for record in gpus.values_mut() {
        if let Some(util) = nodes.get(&record.node_name) {
            record.cpu_utilization = util.cpu as i64;
            record.memory_utilization = util.memory as i64;
        }
    }

    let mut records: Vec<GpuMetrics> = gpus.into_values().collect();
    sort_gpu_metrics(&mut records);

    Correlated { records, skipped }
}

fn new_record(sample: &Sample, node_name: &str, gpu_index: u32, captured_at: &str) -> GpuMetrics {
    GpuMetrics {
        node_name: node_name.to_string(),
        gpu_index,
        gpu_name: sample.label(GPU_NAME_LABEL).to_string(),
        timestamp: captured_at.to_string(),
        ..GpuMetrics::default()
    }
}

/// Parse an identity label (`gpu_id`, `pid`).
///
/// Only canonical decimal forms are accepted, so `"00"` or `"+1"` cannot
/// alias the key of `"0"` or `"1"`.
pub(crate) fn parse_id(label: &str) -> Option<u32> {
    label
        .parse::<u32>()
        .ok()
        .filter(|id| id.to_string() == label)
}
