//! Fixed metric definitions served by the dashboard.
//!
//! Each [`MetricTemplate`] is a query with everything but the monitored
//! resource baked in. [`MetricTemplate::resolve`] fills the resource in from
//! [`ResourceDimensions`] at request time.

use crate::metric::{MetricQuery, Statistic, Unit, CHECK_PERIOD_SECS};

use self::DimensionSet::{Instance, RootFilesystem};
use Statistic::{Average, Sum};

// ---------------------------------------------------------------------------
// Namespaces and dimension names
// ---------------------------------------------------------------------------

/// Built-in EC2 instance metrics.
pub const NAMESPACE_EC2: &str = "AWS/EC2";

/// Metrics reported by the CloudWatch agent running on the instance.
pub const NAMESPACE_AGENT: &str = "CWAgent";

/// Application counters forwarded by the agent's StatsD listener.
pub const NAMESPACE_STATSD: &str = "StatsD";

pub const DIM_INSTANCE_ID: &str = "InstanceId";
pub const DIM_PATH: &str = "path";
pub const DIM_DEVICE: &str = "device";
pub const DIM_FSTYPE: &str = "fstype";

/// Metric listed by the disk debug endpoint.
pub const DISK_USED_PERCENT: &str = "disk_used_percent";

// ---------------------------------------------------------------------------
// Resource identification
// ---------------------------------------------------------------------------

/// Identifies the monitored instance and its root filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDimensions {
    pub instance_id: String,
    pub root_path: String,
    pub root_device: String,
    pub root_fstype: String,
}

impl ResourceDimensions {
    /// Root filesystem defaults for an Amazon Linux instance.
    pub fn for_instance(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            root_path: "/".into(),
            root_device: "xvda1".into(),
            root_fstype: "xfs".into(),
        }
    }
}

/// Which dimensions a template narrows by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionSet {
    /// `InstanceId` only.
    Instance,
    /// `InstanceId`, `path`, `device`, `fstype` of the root filesystem.
    RootFilesystem,
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricTemplate {
    pub namespace: &'static str,
    pub metric_name: &'static str,
    pub lookback_minutes: i64,
    pub statistic: Statistic,
    pub unit: Option<Unit>,
    pub dimensions: DimensionSet,
}

impl MetricTemplate {
    const fn new(
        namespace: &'static str,
        metric_name: &'static str,
        lookback_minutes: i64,
        statistic: Statistic,
        unit: Option<Unit>,
        dimensions: DimensionSet,
    ) -> Self {
        Self {
            namespace,
            metric_name,
            lookback_minutes,
            statistic,
            unit,
            dimensions,
        }
    }

    /// Build the concrete query for `resource`.
    pub fn resolve(&self, resource: &ResourceDimensions) -> MetricQuery {
        let query = MetricQuery::new(self.namespace, self.metric_name)
            .with_lookback_minutes(self.lookback_minutes)
            .with_statistic(self.statistic)
            .with_unit(self.unit)
            .with_dimension(DIM_INSTANCE_ID, resource.instance_id.as_str());

        match self.dimensions {
            DimensionSet::Instance => query,
            DimensionSet::RootFilesystem => query
                .with_dimension(DIM_PATH, resource.root_path.as_str())
                .with_dimension(DIM_DEVICE, resource.root_device.as_str())
                .with_dimension(DIM_FSTYPE, resource.root_fstype.as_str()),
        }
    }
}

pub const CPU: MetricTemplate =
    MetricTemplate::new(NAMESPACE_EC2, "CPUUtilization", 30, Average, None, Instance);

pub const MEMORY: MetricTemplate = MetricTemplate::new(
    NAMESPACE_AGENT,
    "mem_used_percent",
    30,
    Average,
    Some(Unit::Percent),
    Instance,
);

pub const DISK_ROOT: MetricTemplate = MetricTemplate::new(
    NAMESPACE_AGENT,
    DISK_USED_PERCENT,
    60,
    Average,
    Some(Unit::Percent),
    RootFilesystem,
);

pub const DISK_ALL: MetricTemplate = MetricTemplate::new(
    NAMESPACE_AGENT,
    DISK_USED_PERCENT,
    60,
    Average,
    Some(Unit::Percent),
    Instance,
);

pub const DISKIO_READ: MetricTemplate = MetricTemplate::new(
    NAMESPACE_AGENT,
    "diskio_read_bytes",
    30,
    Sum,
    Some(Unit::Bytes),
    Instance,
);

pub const DISKIO_WRITE: MetricTemplate = MetricTemplate::new(
    NAMESPACE_AGENT,
    "diskio_write_bytes",
    30,
    Sum,
    Some(Unit::Bytes),
    Instance,
);

pub const NETWORK_IN: MetricTemplate = MetricTemplate::new(
    NAMESPACE_EC2,
    "NetworkIn",
    30,
    Average,
    Some(Unit::Bytes),
    Instance,
);

pub const NETWORK_OUT: MetricTemplate = MetricTemplate::new(
    NAMESPACE_EC2,
    "NetworkOut",
    30,
    Average,
    Some(Unit::Bytes),
    Instance,
);

pub const STATSD_REQUESTS: MetricTemplate =
    MetricTemplate::new(NAMESPACE_STATSD, "requests.count", 30, Sum, None, Instance);

pub const STATSD_LATENCY: MetricTemplate = MetricTemplate::new(
    NAMESPACE_STATSD,
    "latency.avg",
    30,
    Average,
    Some(Unit::Milliseconds),
    Instance,
);

pub const STATSD_ERRORS: MetricTemplate =
    MetricTemplate::new(NAMESPACE_STATSD, "errors.count", 30, Sum, None, Instance);

pub const STATSD_MEMORY: MetricTemplate = MetricTemplate::new(
    NAMESPACE_STATSD,
    "memory.usage",
    30,
    Average,
    Some(Unit::Megabytes),
    Instance,
);

/// Query used by the scheduled CPU check: the last hour at five minute
/// resolution.
pub fn cpu_check_query(instance_id: &str) -> MetricQuery {
    CPU.resolve(&ResourceDimensions::for_instance(instance_id))
        .with_lookback_minutes(crate::alert::CPU_CHECK_LOOKBACK_MINUTES)
        .with_period_secs(CHECK_PERIOD_SECS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
