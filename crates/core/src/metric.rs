//! Metric data model: queries sent to the metrics backend and the samples
//! that come back.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sampling period used by the dashboard endpoints (seconds).
pub const DEFAULT_PERIOD_SECS: i32 = 60;

/// Sampling period used by the scheduled CPU check (seconds).
pub const CHECK_PERIOD_SECS: i32 = 300;

/// The backend only accepts periods that are multiples of one minute.
const PERIOD_GRANULARITY_SECS: i32 = 60;

// ---------------------------------------------------------------------------
// Statistic / Unit
// ---------------------------------------------------------------------------

/// Aggregation applied to raw samples within each period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Statistic {
    Average,
    Sum,
    Minimum,
    Maximum,
    SampleCount,
}

impl Statistic {
    /// Wire name understood by the metrics backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Average => "Average",
            Self::Sum => "Sum",
            Self::Minimum => "Minimum",
            Self::Maximum => "Maximum",
            Self::SampleCount => "SampleCount",
        }
    }
}

/// Unit filter for a statistics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Unit {
    Percent,
    Bytes,
    Milliseconds,
    Megabytes,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Percent => "Percent",
            Self::Bytes => "Bytes",
            Self::Milliseconds => "Milliseconds",
            Self::Megabytes => "Megabytes",
        }
    }
}

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// A name/value tag narrowing a metric to one resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// MetricQuery
// ---------------------------------------------------------------------------

/// A single statistics query against the metrics backend.
///
/// The dimension set is expected to identify exactly one monitored resource.
/// That is not checked here; the backend silently aggregates otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricQuery {
    pub namespace: String,
    pub metric_name: String,
    /// Window length ending at "now".
    pub lookback_minutes: i64,
    pub period_secs: i32,
    pub statistic: Statistic,
    pub unit: Option<Unit>,
    /// Order is preserved when sent to the backend.
    pub dimensions: Vec<Dimension>,
}

impl MetricQuery {
    /// Start a query with a 30 minute window, 60 second period and the
    /// `Average` statistic.
    pub fn new(namespace: impl Into<String>, metric_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            metric_name: metric_name.into(),
            lookback_minutes: 30,
            period_secs: DEFAULT_PERIOD_SECS,
            statistic: Statistic::Average,
            unit: None,
            dimensions: Vec::new(),
        }
    }

    pub fn with_lookback_minutes(mut self, minutes: i64) -> Self {
        self.lookback_minutes = minutes;
        self
    }

    pub fn with_period_secs(mut self, period_secs: i32) -> Self {
        self.period_secs = period_secs;
        self
    }

    pub fn with_statistic(mut self, statistic: Statistic) -> Self {
        self.statistic = statistic;
        self
    }

    pub fn with_unit(mut self, unit: Option<Unit>) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_dimension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.push(Dimension::new(name, value));
        self
    }

    /// Reject queries the backend would refuse.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.namespace.trim().is_empty() {
            return Err(CoreError::Validation("namespace must not be empty".into()));
        }
        if self.metric_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "metric_name must not be empty".into(),
            ));
        }
        if self.lookback_minutes <= 0 {
            return Err(CoreError::Validation(format!(
                "lookback_minutes must be positive, got {}",
                self.lookback_minutes
            )));
        }
        if self.period_secs <= 0 || self.period_secs % PERIOD_GRANULARITY_SECS != 0 {
            return Err(CoreError::Validation(format!(
                "period_secs must be a positive multiple of {PERIOD_GRANULARITY_SECS}, got {}",
                self.period_secs
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Backend records
// ---------------------------------------------------------------------------

/// A raw datapoint as returned by the backend, one field per statistic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datapoint {
    pub timestamp: Option<Timestamp>,
    pub average: Option<f64>,
    pub sum: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub sample_count: Option<f64>,
}

impl Datapoint {
    /// The field corresponding to `statistic`.
    pub fn value(&self, statistic: Statistic) -> Option<f64> {
        match statistic {
            Statistic::Average => self.average,
            Statistic::Sum => self.sum,
            Statistic::Minimum => self.minimum,
            Statistic::Maximum => self.maximum,
            Statistic::SampleCount => self.sample_count,
        }
    }
}

/// A known metric series as reported by the backend's listing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDescriptor {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Vec<Dimension>,
}

impl MetricDescriptor {
    /// Whether this series carries the dimension `name=value`.
    pub fn has_dimension(&self, name: &str, value: &str) -> bool {
        self.dimensions
            .iter()
            .any(|d| d.name == name && d.value == value)
    }
}

// ---------------------------------------------------------------------------
// Normalized series
// ---------------------------------------------------------------------------

/// One point of a normalized series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub time: Timestamp,
    pub value: f64,
}

impl Sample {
    pub fn new(time: Timestamp, value: f64) -> Self {
        Self { time, value }
    }
}

/// Two series joined on timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairedSample {
    pub time: Timestamp,
    pub primary: f64,
    pub secondary: f64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
