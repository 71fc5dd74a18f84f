//! Per-process correlation, keyed by (node, GPU index, pid).

use std::collections::HashMap;

use gpumon_prom::{QueryResponse, Sample};

use crate::gpu::parse_id;
use crate::ordering::sort_gpu_processes;
use crate::queries::{
    COMMAND_LABEL, GPU_ID_LABEL, HOSTNAME_LABEL, PID_LABEL, PROCESS_NAME_LABEL, ProcessMetric,
    USER_LABEL,
};
use crate::types::{Correlated, GpuProcess, SkipStats};

type ProcessKey = (String, u32, u32);

/// Join process metric responses into one record per (node, GPU index, pid).
///
/// A sample missing any of the three identity labels, or carrying one that
/// is not a canonical unsigned integer, is dropped before a record exists.
/// The same pid on two GPUs of one node yields two records. Descriptive
/// labels come from the first sample seen for a key.
///
/// Records are always sorted by (node name, GPU index, pid).
#[must_use]
pub fn correlate_gpu_processes(
    results: &HashMap<ProcessMetric, QueryResponse>,
    captured_at: &str,
) -> Correlated<GpuProcess> {
    let mut skipped = SkipStats::default();
    let mut procs: HashMap<ProcessKey, GpuProcess> = HashMap::new();

    for metric in ProcessMetric::ALL {
        let Some(response) = results.get(&metric) else {
            continue;
        };

        for sample in response.samples() {
            let Some(key) = process_key(sample) else {
                skipped.missing_labels += 1;
                continue;
            };

            let Some(value) = sample.parse_value() else {
                skipped.invalid_values += 1;
                continue;
            };

            let record = procs
                .entry(key)
                .or_insert_with_key(|key| new_record(sample, key, captured_at));

            match metric {
                ProcessMetric::GpuMemory => record.gpu_memory = value as i64,
            }
        }
    }

    let mut records: Vec<GpuProcess> = procs.into_values().collect();
    sort_gpu_processes(&mut records);

    Correlated { records, skipped }
}

fn process_key(sample: &Sample) -> Option<ProcessKey> {
    let node_name = sample.label(HOSTNAME_LABEL);
    if node_name.is_empty() {
        return None;
    }
    let gpu_index = parse_id(sample.label(GPU_ID_LABEL))?;
    let pid = parse_id(sample.label(PID_LABEL))?;
    Some((node_name.to_string(), gpu_index, pid))
}

fn new_record(sample: &Sample, key: &ProcessKey, captured_at: &str) -> GpuProcess {
    let (node_name, gpu_index, pid) = key;
    GpuProcess {
        node_name: node_name.clone(),
        gpu_index: *gpu_index,
        pid: *pid,
        process_name: sample.label(PROCESS_NAME_LABEL).to_string(),
        user: sample.label(USER_LABEL).to_string(),
        command: sample.label(COMMAND_LABEL).to_string(),
        gpu_memory: 0,
        timestamp: captured_at.to_string(),
    }
}
