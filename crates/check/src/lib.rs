//! Scheduled CPU threshold check.
//!
//! Runs once per invocation: fetch the last hour of CPU utilization for one
//! instance, and publish a notification when the mean exceeds
//! [`CPU_ALERT_THRESHOLD`](cloudpulse_core::alert::CPU_ALERT_THRESHOLD).

pub mod config;
pub mod error;

use cloudpulse_cloud::{AlertPublisher, MetricFetcher};
use cloudpulse_core::alert::{cpu_alert_message, evaluate_cpu, CpuVerdict, CPU_ALERT_SUBJECT};
use cloudpulse_core::catalog::cpu_check_query;

pub use config::{CheckConfig, ConfigError};
pub use error::CheckError;

/// What a single check run did.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// No datapoints in the window; nothing published.
    NoData,
    /// Mean at or below the threshold; nothing published.
    Normal { average: f64 },
    /// Mean above the threshold; one notification published.
    Alerted {
        average: f64,
        message_id: Option<String>,
    },
}

/// Run one CPU check for `instance_id`.
///
/// There is no de-duplication across runs: every breaching run publishes.
pub async fn run_check(
    fetcher: &MetricFetcher,
    publisher: &AlertPublisher,
    instance_id: &str,
) -> Result<CheckOutcome, CheckError> {
    let samples = fetcher.fetch(&cpu_check_query(instance_id)).await?;

    match evaluate_cpu(&samples) {
        CpuVerdict::NoData => {
            tracing::info!(instance_id, "No data points found");
            Ok(CheckOutcome::NoData)
        }
        CpuVerdict::Normal { average } => {
            tracing::info!(instance_id, average = %format!("{average:.2}"), "CPU utilization is normal");
            Ok(CheckOutcome::Normal { average })
        }
        CpuVerdict::Breach { average } => {
            tracing::warn!(instance_id, average = %format!("{average:.2}"), "CPU utilization above threshold");
            let message = cpu_alert_message(instance_id, average);
            let message_id = publisher.publish(CPU_ALERT_SUBJECT, &message).await?;
            tracing::info!(instance_id, "Alert sent");
            Ok(CheckOutcome::Alerted {
                average,
                message_id,
            })
        }
    }
}
