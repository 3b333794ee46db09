use async_trait::async_trait;
use cloudpulse_core::metric::{Datapoint, MetricDescriptor, MetricQuery};
use cloudpulse_core::types::Timestamp;

use crate::error::CloudError;

/// A statistics request: the query plus the absolute window it covers.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsRequest<'a> {
    pub query: &'a MetricQuery,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Read-only access to a managed metrics store.
///
/// Implementations return datapoints in whatever order the store produces;
/// ordering is the caller's concern.
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    /// Aggregated datapoints for one metric over `request`'s window.
    async fn get_statistics(
        &self,
        request: StatisticsRequest<'_>,
    ) -> Result<Vec<Datapoint>, CloudError>;

    /// Every known series for `metric_name` in `namespace`, across all
    /// dimension combinations.
    async fn list_metrics(
        &self,
        namespace: &str,
        metric_name: &str,
    ) -> Result<Vec<MetricDescriptor>, CloudError>;
}
