//! Static PromQL query tables.

use std::fmt::Debug;
use std::hash::Hash;

/// Label carrying the node hostname.
pub const HOSTNAME_LABEL: &str = "hostname";
/// Label carrying the GPU index.
pub const GPU_ID_LABEL: &str = "gpu_id";
/// Label carrying the GPU model name.
pub const GPU_NAME_LABEL: &str = "gpu_name";
/// Label carrying the process id.
pub const PID_LABEL: &str = "pid";
/// Label carrying the process name.
pub const PROCESS_NAME_LABEL: &str = "process_name";
/// Label carrying the process owner.
pub const USER_LABEL: &str = "user";
/// Label carrying the process command line.
pub const COMMAND_LABEL: &str = "command";

/// A logical metric backed by one PromQL expression.
pub trait MetricKind: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Logical name, used in errors and logs.
    fn name(self) -> &'static str;
    /// PromQL expression sent to Prometheus.
    fn expr(self) -> &'static str;
}

/// Metrics joined into [`GpuMetrics`](crate::types::GpuMetrics) records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpuMetric {
    /// Free framebuffer memory.
    MemoryFree,
    /// Used framebuffer memory.
    MemoryUsed,
    /// Total framebuffer memory.
    MemoryTotal,
    /// GPU utilization percent.
    Utilization,
    /// GPU temperature.
    Temperature,
    /// Host CPU utilization, labeled by node only.
    CpuUtilization,
    /// Host memory utilization, labeled by node only.
    MemoryUtilization,
}

impl GpuMetric {
    /// Every GPU metric, in correlation order.
    pub const ALL: [Self; 7] = [
        Self::MemoryFree,
        Self::MemoryUsed,
        Self::MemoryTotal,
        Self::Utilization,
        Self::Temperature,
        Self::CpuUtilization,
        Self::MemoryUtilization,
    ];

    /// Whether the metric describes a whole node rather than one GPU.
    #[must_use]
    pub const fn is_node_scoped(self) -> bool {
        matches!(self, Self::CpuUtilization | Self::MemoryUtilization)
    }
}

impl MetricKind for GpuMetric {
    fn name(self) -> &'static str {
        match self {
            Self::MemoryFree => "gpu_mem_free",
            Self::MemoryUsed => "gpu_mem_used",
            Self::MemoryTotal => "gpu_mem_total",
            Self::Utilization => "gpu_utilization",
            Self::Temperature => "gpu_temperature",
            Self::CpuUtilization => "cpu_utilization",
            Self::MemoryUtilization => "memory_utilization",
        }
    }

    fn expr(self) -> &'static str {
        match self {
            Self::MemoryFree => "gpu_metrics_free_memory",
            Self::MemoryUsed => "gpu_metrics_used_memory",
            Self::MemoryTotal => "gpu_metrics_total_memory",
            Self::Utilization => "gpu_metrics_utilization_percent",
            Self::Temperature => "gpu_metrics_temperature",
            Self::CpuUtilization => "gpu_metrics_cpu_utilization",
            Self::MemoryUtilization => "gpu_metrics_memory_utilization",
        }
    }
}

/// Metrics joined into [`GpuProcess`](crate::types::GpuProcess) records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessMetric {
    /// GPU memory held by a process.
    GpuMemory,
}

impl ProcessMetric {
    /// Every process metric.
    pub const ALL: [Self; 1] = [Self::GpuMemory];
}

impl MetricKind for ProcessMetric {
    fn name(self) -> &'static str {
        match self {
            Self::GpuMemory => "gpu_memory",
        }
    }

    fn expr(self) -> &'static str {
        match self {
            Self::GpuMemory => "gpu_process_gpu_memory",
        }
    }
}
