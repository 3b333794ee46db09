//! Metric endpoints, declared as data.
//!
//! Every series endpoint is one [`MetricEndpoint`] entry in
//! [`METRIC_ENDPOINTS`]; [`router`] mounts one GET route per entry and
//! dispatches it to [`metrics::serve`].

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use cloudpulse_core::catalog::{self, MetricTemplate};

use crate::handlers::metrics;
use crate::state::AppState;

/// How a paired series is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRender {
    /// `{time, read, write}` with raw values.
    ReadWrite,
    /// `{time, in, out}` converted from bytes to megabytes as text.
    Megabytes,
}

/// What an endpoint fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesSource {
    Single(MetricTemplate),
    /// Two series fetched concurrently and joined on timestamp.
    Paired {
        primary: MetricTemplate,
        secondary: MetricTemplate,
        render: PairRender,
    },
}

/// Fixed configuration for one series endpoint.
#[derive(Debug, Clone, Copy)]
pub struct MetricEndpoint {
    pub name: &'static str,
    pub path: &'static str,
    pub series: SeriesSource,
    /// Error text returned with a 500.
    pub failure: &'static str,
    /// Include the backend error text as `details` in the 500 body.
    pub expose_details: bool,
}

impl MetricEndpoint {
    const fn single(
        name: &'static str,
        path: &'static str,
        template: MetricTemplate,
        failure: &'static str,
    ) -> Self {
        Self {
            name,
            path,
            series: SeriesSource::Single(template),
            failure,
            expose_details: false,
        }
    }
}

pub const CPU: MetricEndpoint = MetricEndpoint::single(
    "cpu",
    "/metrics/cpu",
    catalog::CPU,
    "Failed to fetch CPU metrics",
);

pub const MEMORY: MetricEndpoint = MetricEndpoint::single(
    "memory",
    "/metrics/memory",
    catalog::MEMORY,
    "Failed to fetch memory metrics",
);

pub const DISK: MetricEndpoint = MetricEndpoint::single(
    "disk",
    "/metrics/disk",
    catalog::DISK_ROOT,
    "Failed to fetch disk metrics",
);

pub const DISK_ROOT: MetricEndpoint = MetricEndpoint::single(
    "disk_root",
    "/metrics/disk/root",
    catalog::DISK_ROOT,
    "Failed to fetch root disk metrics",
);

pub const DISK_ALL: MetricEndpoint = MetricEndpoint::single(
    "disk_all",
    "/metrics/disk/all",
    catalog::DISK_ALL,
    "Failed to fetch disk metrics",
);

pub const DISKIO: MetricEndpoint = MetricEndpoint {
    name: "diskio",
    path: "/metrics/diskio",
    series: SeriesSource::Paired {
        primary: catalog::DISKIO_READ,
        secondary: catalog::DISKIO_WRITE,
        render: PairRender::ReadWrite,
    },
    failure: "Failed to fetch disk I/O metrics",
    expose_details: true,
};

pub const NETWORK: MetricEndpoint = MetricEndpoint {
    name: "network",
    path: "/metrics/network",
    series: SeriesSource::Paired {
        primary: catalog::NETWORK_IN,
        secondary: catalog::NETWORK_OUT,
        render: PairRender::Megabytes,
    },
    failure: "Failed to fetch network metrics",
    expose_details: false,
};

pub const STATSD_REQUESTS: MetricEndpoint = MetricEndpoint::single(
    "statsd_requests",
    "/metrics/statsd/requests",
    catalog::STATSD_REQUESTS,
    "Failed to fetch requests count",
);

pub const STATSD_LATENCY: MetricEndpoint = MetricEndpoint::single(
    "statsd_latency",
    "/metrics/statsd/latency",
    catalog::STATSD_LATENCY,
    "Failed to fetch latency",
);

pub const STATSD_ERRORS: MetricEndpoint = MetricEndpoint::single(
    "statsd_errors",
    "/metrics/statsd/errors",
    catalog::STATSD_ERRORS,
    "Failed to fetch errors count",
);

pub const STATSD_MEMORY: MetricEndpoint = MetricEndpoint::single(
    "statsd_memory",
    "/metrics/statsd/memory",
    catalog::STATSD_MEMORY,
    "Failed to fetch memory usage",
);

/// All series endpoints. `name` is unique and used in logs.
pub static METRIC_ENDPOINTS: &[MetricEndpoint] = &[
    CPU,
    MEMORY,
    DISK,
    DISK_ROOT,
    DISK_ALL,
    DISKIO,
    NETWORK,
    STATSD_REQUESTS,
    STATSD_LATENCY,
    STATSD_ERRORS,
    STATSD_MEMORY,
];

/// ```text
/// GET <endpoint.path>           -> serve (one per METRIC_ENDPOINTS entry)
/// GET /metrics/disk/debug       -> disk_debug
/// GET /metrics/dashboard        -> dashboard
/// ```
pub fn router() -> Router<AppState> {
    let router = Router::new()
        .route("/metrics/disk/debug", get(metrics::disk_debug))
        .route("/metrics/dashboard", get(metrics::dashboard));

    METRIC_ENDPOINTS.iter().fold(router, |router, endpoint| {
        router.route(
            endpoint.path,
            get(move |State(state): State<AppState>| metrics::serve(state, endpoint)),
        )
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_and_paths_are_unique() {
        let names: HashSet<_> = METRIC_ENDPOINTS.iter().map(|e| e.name).collect();
        let paths: HashSet<_> = METRIC_ENDPOINTS.iter().map(|e| e.path).collect();
        assert_eq!(names.len(), METRIC_ENDPOINTS.len());
        assert_eq!(paths.len(), METRIC_ENDPOINTS.len());
    }

    #[test]
    fn disk_and_disk_root_share_a_template() {
        assert_eq!(DISK.series, DISK_ROOT.series);
        assert_ne!(DISK.failure, DISK_ROOT.failure);
    }

    #[test]
    fn only_diskio_exposes_details() {
        let exposing: Vec<_> = METRIC_ENDPOINTS
            .iter()
            .filter(|e| e.expose_details)
            .map(|e| e.name)
            .collect();
        assert_eq!(exposing, ["diskio"]);
    }
}
