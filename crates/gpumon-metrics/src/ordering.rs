//! Deterministic ordering of correlated records.

use std::cmp::Ordering;

use crate::types::{GpuMetrics, GpuProcess};

/// Order GPU records by node name, then GPU index.
pub fn cmp_gpu_metrics(a: &GpuMetrics, b: &GpuMetrics) -> Ordering {
    a.node_name
        .cmp(&b.node_name)
        .then(a.gpu_index.cmp(&b.gpu_index))
}

/// Order process records by node name, GPU index, then pid.
pub fn cmp_gpu_processes(a: &GpuProcess, b: &GpuProcess) -> Ordering {
    a.node_name
        .cmp(&b.node_name)
        .then(a.gpu_index.cmp(&b.gpu_index))
        .then(a.pid.cmp(&b.pid))
}

/// Sort GPU records in place by (node name, GPU index).
pub fn sort_gpu_metrics(records: &mut [GpuMetrics]) {
    records.sort_by(cmp_gpu_metrics);
}

/// Sort process records in place by (node name, GPU index, pid).
pub fn sort_gpu_processes(records: &mut [GpuProcess]) {
    records.sort_by(cmp_gpu_processes);
}
