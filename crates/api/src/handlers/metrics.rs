//! Handlers for the metric read endpoints.

use axum::extract::State;
use axum::Json;
use cloudpulse_cloud::CloudError;
use cloudpulse_core::catalog::{DIM_INSTANCE_ID, DISK_USED_PERCENT, NAMESPACE_AGENT};
use cloudpulse_core::series::combine;

use crate::error::{AppError, AppResult};
use crate::response::{DashboardSnapshot, DiskDebugReport, DiskIoPoint, NetworkPoint, SeriesPayload};
use crate::routes::metrics::{self as endpoints, MetricEndpoint, PairRender, SeriesSource};
use crate::state::AppState;

const DASHBOARD_FAILURE: &str = "Failed to fetch dashboard metrics";
const DEBUG_FAILURE: &str = "Debug failed";

/// GET on any [`MetricEndpoint`] path.
///
/// Any backend failure fails the whole response with the endpoint's fixed
/// message; partial results are never returned.
pub async fn serve(
    state: AppState,
    endpoint: &'static MetricEndpoint,
) -> AppResult<Json<SeriesPayload>> {
    let payload = load_series(&state, &endpoint.series)
        .await
        .map_err(|e| AppError::upstream(endpoint.failure, e, endpoint.expose_details))?;

    tracing::debug!(endpoint = endpoint.name, "Served metric series");
    Ok(Json(payload))
}

/// GET /metrics/dashboard
///
/// Fetches the five dashboard series concurrently.
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardSnapshot>> {
    let (cpu, memory, disk, diskio, network) = futures::try_join!(
        load_series(&state, &endpoints::CPU.series),
        load_series(&state, &endpoints::MEMORY.series),
        load_series(&state, &endpoints::DISK.series),
        load_series(&state, &endpoints::DISKIO.series),
        load_series(&state, &endpoints::NETWORK.series),
    )
    .map_err(|e| AppError::upstream(DASHBOARD_FAILURE, e, false))?;

    Ok(Json(DashboardSnapshot {
        cpu,
        memory,
        disk,
        diskio,
        network,
    }))
}

/// GET /metrics/disk/debug
///
/// Lists every known disk usage series and those tagged with the configured
/// instance, for troubleshooting dimension mismatches.
pub async fn disk_debug(State(state): State<AppState>) -> AppResult<Json<DiskDebugReport>> {
    let all = state
        .fetcher
        .list_series(NAMESPACE_AGENT, DISK_USED_PERCENT)
        .await
        .map_err(|e| AppError::upstream(DEBUG_FAILURE, e, false))?;

    let total_metrics = all.len();
    let instance_id = state.config.resource.instance_id.as_str();
    let metrics: Vec<_> = all
        .into_iter()
        .filter(|m| m.has_dimension(DIM_INSTANCE_ID, instance_id))
        .collect();

    tracing::info!(
        total_metrics,
        instance_metrics = metrics.len(),
        instance_id,
        "Disk metric listing"
    );

    Ok(Json(DiskDebugReport {
        total_metrics,
        instance_metrics: metrics.len(),
        metrics,
    }))
}

/// Fetch and shape one endpoint's series for the configured resource.
async fn load_series(state: &AppState, series: &SeriesSource) -> Result<SeriesPayload, CloudError> {
    let resource = &state.config.resource;

    match *series {
        SeriesSource::Single(template) => {
            let samples = state.fetcher.fetch(&template.resolve(resource)).await?;
            Ok(SeriesPayload::Samples(samples))
        }
        SeriesSource::Paired {
            primary,
            secondary,
            render,
        } => {
            let primary = primary.resolve(resource);
            let secondary = secondary.resolve(resource);
            let (first, second) = futures::future::try_join(
                state.fetcher.fetch(&primary),
                state.fetcher.fetch(&secondary),
            )
            .await?;

            let paired = combine(&first, &second);
            Ok(match render {
                PairRender::ReadWrite => {
                    SeriesPayload::DiskIo(paired.into_iter().map(DiskIoPoint::from).collect())
                }
                PairRender::Megabytes => {
                    SeriesPayload::Network(paired.into_iter().map(NetworkPoint::from).collect())
                }
            })
        }
    }
}
