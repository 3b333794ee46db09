//! [`MetricsBackend`] backed by Amazon CloudWatch.

use async_trait::async_trait;
use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::types::{
    Dimension as CwDimension, StandardUnit, Statistic as CwStatistic,
};
use aws_sdk_cloudwatch::Client;
use aws_smithy_types::DateTime as SmithyDateTime;
use cloudpulse_core::metric::{Datapoint, Dimension, MetricDescriptor};
use cloudpulse_core::types::Timestamp;

use crate::backend::{MetricsBackend, StatisticsRequest};
use crate::error::CloudError;

const OP_GET_STATISTICS: &str = "GetMetricStatistics";
const OP_LIST_METRICS: &str = "ListMetrics";

pub struct CloudWatchBackend {
    client: Client,
}

impl CloudWatchBackend {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from a loaded SDK configuration.
    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

#[async_trait]
impl MetricsBackend for CloudWatchBackend {
    async fn get_statistics(
        &self,
        request: StatisticsRequest<'_>,
    ) -> Result<Vec<Datapoint>, CloudError> {
        let query = request.query;

        let dimensions = query
            .dimensions
            .iter()
            .map(|d| {
                CwDimension::builder()
                    .name(&d.name)
                    .value(&d.value)
                    .build()
            })
            .collect::<Vec<_>>();

        let mut call = self
            .client
            .get_metric_statistics()
            .namespace(&query.namespace)
            .metric_name(&query.metric_name)
            .set_dimensions(Some(dimensions))
            .start_time(to_smithy(request.start))
            .end_time(to_smithy(request.end))
            .period(query.period_secs)
            .statistics(CwStatistic::from(query.statistic.as_str()));

        if let Some(unit) = query.unit {
            call = call.unit(StandardUnit::from(unit.as_str()));
        }

        let output = call.send().await.map_err(|e| CloudError::Backend {
            operation: OP_GET_STATISTICS,
            message: DisplayErrorContext(&e).to_string(),
        })?;

        Ok(output
            .datapoints()
            .iter()
            .map(|dp| Datapoint {
                timestamp: dp.timestamp().and_then(from_smithy),
                average: dp.average(),
                sum: dp.sum(),
                minimum: dp.minimum(),
                maximum: dp.maximum(),
                sample_count: dp.sample_count(),
            })
            .collect())
    }

    async fn list_metrics(
        &self,
        namespace: &str,
        metric_name: &str,
    ) -> Result<Vec<MetricDescriptor>, CloudError> {
        let mut descriptors = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_metrics()
                .namespace(namespace)
                .metric_name(metric_name)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| CloudError::Backend {
                    operation: OP_LIST_METRICS,
                    message: DisplayErrorContext(&e).to_string(),
                })?;

            descriptors.extend(output.metrics().iter().map(|m| MetricDescriptor {
                namespace: m.namespace().unwrap_or(namespace).to_string(),
                metric_name: m.metric_name().unwrap_or(metric_name).to_string(),
                dimensions: m
                    .dimensions()
                    .iter()
                    .map(|d| Dimension::new(d.name().unwrap_or_default(), d.value().unwrap_or_default()))
                    .collect(),
            }));

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        tracing::debug!(
            namespace,
            metric_name,
            count = descriptors.len(),
            "Listed metric series"
        );
        Ok(descriptors)
    }
}

fn to_smithy(ts: Timestamp) -> SmithyDateTime {
    SmithyDateTime::from_millis(ts.timestamp_millis())
}

fn from_smithy(dt: &SmithyDateTime) -> Option<Timestamp> {
    chrono::DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_conversion_preserves_millis() {
        let ts = chrono::DateTime::from_timestamp_millis(1_700_000_123_456).unwrap();
        let back = from_smithy(&to_smithy(ts)).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn statistic_and_unit_names_map_to_sdk_enums() {
        use cloudpulse_core::metric::{Statistic, Unit};

        assert_eq!(
            CwStatistic::from(Statistic::Sum.as_str()),
            CwStatistic::Sum
        );
        assert_eq!(
            CwStatistic::from(Statistic::Average.as_str()),
            CwStatistic::Average
        );
        assert_eq!(StandardUnit::from(Unit::Percent.as_str()), StandardUnit::Percent);
        assert_eq!(
            StandardUnit::from(Unit::Milliseconds.as_str()),
            StandardUnit::Milliseconds
        );
    }
}
