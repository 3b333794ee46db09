//! Metric Fetcher: one statistics query in, a sorted series out.

use std::sync::Arc;

use chrono::{Duration, Utc};
use cloudpulse_core::metric::{MetricDescriptor, MetricQuery, Sample};

use crate::backend::{MetricsBackend, StatisticsRequest};
use crate::error::CloudError;

/// Reads normalized series from an injected [`MetricsBackend`].
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct MetricFetcher {
    backend: Arc<dyn MetricsBackend>,
}

impl MetricFetcher {
    pub fn new(backend: Arc<dyn MetricsBackend>) -> Self {
        Self { backend }
    }

    /// Fetch `query` over `[now - lookback, now]`.
    ///
    /// The result is sorted ascending by time whatever order the backend
    /// used. Datapoints without a timestamp or without the requested
    /// statistic are dropped. Backend errors are returned as-is, not retried.
    pub async fn fetch(&self, query: &MetricQuery) -> Result<Vec<Sample>, CloudError> {
        query.validate()?;

        let end = Utc::now();
        let start = end - Duration::minutes(query.lookback_minutes);

        tracing::debug!(
            namespace = %query.namespace,
            metric_name = %query.metric_name,
            statistic = query.statistic.as_str(),
            unit = query.unit.map(|u| u.as_str()),
            period_secs = query.period_secs,
            %start,
            %end,
            "Querying metric statistics"
        );

        let datapoints = self
            .backend
            .get_statistics(StatisticsRequest { query, start, end })
            .await?;
        let received = datapoints.len();

        let mut samples: Vec<Sample> = datapoints
            .iter()
            .filter_map(|dp| match (dp.timestamp, dp.value(query.statistic)) {
                (Some(time), Some(value)) => Some(Sample::new(time, value)),
                _ => {
                    tracing::debug!(
                        metric_name = %query.metric_name,
                        ?dp,
                        "Skipping incomplete datapoint"
                    );
                    None
                }
            })
            .collect();
        samples.sort_by_key(|s| s.time);

        tracing::debug!(
            metric_name = %query.metric_name,
            received,
            returned = samples.len(),
            "Received datapoints"
        );

        Ok(samples)
    }

    /// List every known series for a metric (diagnostics only).
    pub async fn list_series(
        &self,
        namespace: &str,
        metric_name: &str,
    ) -> Result<Vec<MetricDescriptor>, CloudError> {
        self.backend.list_metrics(namespace, metric_name).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
