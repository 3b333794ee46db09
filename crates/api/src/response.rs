//! JSON response bodies.
//!
//! These shapes are consumed directly by the dashboard front end, so field
//! names are part of the external interface.

use cloudpulse_core::metric::{MetricDescriptor, PairedSample, Sample};
use cloudpulse_core::series::bytes_to_megabytes;
use cloudpulse_core::types::Timestamp;
use serde::Serialize;

/// `{ time, read, write }` for disk I/O.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskIoPoint {
    pub time: Timestamp,
    pub read: f64,
    pub write: f64,
}

impl From<PairedSample> for DiskIoPoint {
    fn from(p: PairedSample) -> Self {
        Self {
            time: p.time,
            read: p.primary,
            write: p.secondary,
        }
    }
}

/// `{ time, in, out }` for network throughput, in megabytes as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkPoint {
    pub time: Timestamp,
    #[serde(rename = "in")]
    pub inbound: String,
    #[serde(rename = "out")]
    pub outbound: String,
}

impl From<PairedSample> for NetworkPoint {
    fn from(p: PairedSample) -> Self {
        Self {
            time: p.time,
            inbound: bytes_to_megabytes(p.primary),
            outbound: bytes_to_megabytes(p.secondary),
        }
    }
}

/// Body of any series endpoint. Serializes as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesPayload {
    Samples(Vec<Sample>),
    DiskIo(Vec<DiskIoPoint>),
    Network(Vec<NetworkPoint>),
}

/// GET /metrics/dashboard
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub cpu: SeriesPayload,
    pub memory: SeriesPayload,
    pub disk: SeriesPayload,
    pub diskio: SeriesPayload,
    pub network: SeriesPayload,
}

/// GET /metrics/disk/debug
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskDebugReport {
    /// Series known for the metric across all resources.
    pub total_metrics: usize,
    /// Series tagged with the configured instance.
    pub instance_metrics: usize,
    pub metrics: Vec<MetricDescriptor>,
}

/// POST /alert
#[derive(Debug, Serialize)]
pub struct AlertAccepted {
    pub success: bool,
}
