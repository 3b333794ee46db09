use std::sync::Arc;

use cloudpulse_check::{run_check, CheckConfig};
use cloudpulse_cloud::{AlertPublisher, CloudWatchBackend, MetricFetcher, SnsChannel};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One check per invocation. Failures are logged; the exit status is always 0.
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloudpulse_check=info,cloudpulse_cloud=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match CheckConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return;
        }
    };

    let sdk_config = cloudpulse_cloud::load_sdk_config(&config.region).await;
    let fetcher = MetricFetcher::new(Arc::new(CloudWatchBackend::from_conf(&sdk_config)));
    let publisher = AlertPublisher::new(Arc::new(SnsChannel::from_conf(
        &sdk_config,
        config.sns_topic_arn.clone(),
    )));

    match run_check(&fetcher, &publisher, &config.instance_id).await {
        Ok(outcome) => tracing::debug!(?outcome, "Check finished"),
        Err(e) => tracing::error!(error = %e, "Error fetching metrics or sending alert"),
    }
}
