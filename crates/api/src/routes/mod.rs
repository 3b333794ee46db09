pub mod alert;
pub mod health;
pub mod metrics;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree (everything except `/health`).
///
/// ```text
/// /metrics/cpu                      CPU utilization
/// /metrics/memory                   memory % used
/// /metrics/disk                     root filesystem % used
/// /metrics/disk/root                root filesystem % used
/// /metrics/disk/all                 % used, instance dimension only
/// /metrics/disk/debug               known disk series for the instance
/// /metrics/diskio                   disk read/write bytes
/// /metrics/network                  network in/out (MB)
/// /metrics/statsd/requests          request count
/// /metrics/statsd/latency           average latency
/// /metrics/statsd/errors            error count
/// /metrics/statsd/memory            application memory
/// /metrics/dashboard                cpu, memory, disk, diskio, network at once
///
/// /alert                            send manual notification (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(metrics::router())
        .merge(alert::router())
}
