//! Records emitted by the correlators.

use serde::{Deserialize, Serialize};

/// Metrics for one GPU, keyed by (node name, GPU index).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuMetrics {
    /// Node hostname.
    pub node_name: String,
    /// GPU index on the node.
    pub gpu_index: u32,
    /// GPU model name.
    pub gpu_name: String,
    /// Used memory, as reported by the exporter.
    #[serde(rename = "gpu_memory_used")]
    pub memory_used: i64,
    /// Total memory, as reported by the exporter.
    #[serde(rename = "gpu_memory_total")]
    pub memory_total: i64,
    /// Free memory, as reported by the exporter.
    pub memory_free: i64,
    /// GPU utilization percent.
    #[serde(rename = "gpu_utilization")]
    pub utilization: i64,
    /// GPU temperature in degrees.
    pub temperature: i64,
    /// Host CPU utilization percent (shared by all GPUs of the node).
    pub cpu_utilization: i64,
    /// Host memory utilization percent (shared by all GPUs of the node).
    pub memory_utilization: i64,
    /// When the record was captured.
    pub timestamp: String,
}

/// A process holding GPU memory, keyed by (node name, GPU index, pid).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuProcess {
    /// Node hostname.
    pub node_name: String,
    /// GPU index the process runs on.
    pub gpu_index: u32,
    /// Process id.
    pub pid: u32,
    /// Executable name.
    pub process_name: String,
    /// Owning user.
    pub user: String,
    /// Full command line.
    pub command: String,
    /// GPU memory held by the process.
    pub gpu_memory: i64,
    /// When the record was captured.
    pub timestamp: String,
}

/// Counts of samples dropped during correlation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipStats {
    /// Samples missing an identity label (hostname, GPU index, pid) or
    /// carrying one that does not parse.
    pub missing_labels: usize,
    /// Samples whose value was absent or not a number.
    pub invalid_values: usize,
}

impl SkipStats {
    /// Total samples skipped.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.missing_labels + self.invalid_values
    }

    /// True when nothing was skipped.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Output of a correlator: the records plus what was dropped on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correlated<T> {
    /// Correlated records.
    pub records: Vec<T>,
    /// Skipped sample counts.
    pub skipped: SkipStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_metrics_json_keys() {
        let record = GpuMetrics {
            node_name: "node1".to_string(),
            gpu_index: 0,
            gpu_name: "NVIDIA Tesla V100".to_string(),
            memory_used: 8192,
            memory_total: 16384,
            memory_free: 8192,
            utilization: 75,
            temperature: 65,
            cpu_utilization: 25,
            memory_utilization: 50,
            timestamp: "2024/01/01 12:00:00".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["node_name"], "node1");
        assert_eq!(json["gpu_index"], 0);
        assert_eq!(json["gpu_memory_used"], 8192);
        assert_eq!(json["gpu_memory_total"], 16384);
        assert_eq!(json["memory_free"], 8192);
        assert_eq!(json["gpu_utilization"], 75);
        assert_eq!(json["temperature"], 65);
        assert_eq!(json["cpu_utilization"], 25);
        assert_eq!(json["memory_utilization"], 50);
        assert_eq!(json["timestamp"], "2024/01/01 12:00:00");
    }

    #[test]
    fn gpu_process_json_keys() {
        let record = GpuProcess {
            node_name: "node1".to_string(),
            gpu_index: 1,
            pid: 1234,
            process_name: "python".to_string(),
            user: "alice".to_string(),
            command: "python train.py".to_string(),
            gpu_memory: 2048,
            timestamp: String::new(),
        };

        let json = serde_json::to_value(&record).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();

        for key in [
            "node_name",
            "gpu_index",
            "pid",
            "process_name",
            "user",
            "command",
            "gpu_memory",
            "timestamp",
        ] {
            assert!(keys.iter().any(|k| k == key), "missing key {key}");
        }
        assert_eq!(json["gpu_memory"], 2048);
    }

    #[test]
    fn skip_stats_totals() {
        let stats = SkipStats {
            missing_labels: 2,
            invalid_values: 3,
        };

        assert_eq!(stats.total(), 5);
        assert!(!stats.is_clean());
        assert!(SkipStats::default().is_clean());
    }
}
