//! Outbound integrations: the metrics backend and the notification channel.
//!
//! Both sit behind traits ([`MetricsBackend`], [`NotificationChannel`]) so the
//! HTTP server and the scheduled check receive their clients by injection and
//! tests can substitute in-memory fakes. [`MetricFetcher`] and
//! [`AlertPublisher`] are the entry points the callers use.

pub mod backend;
pub mod channel;
pub mod cloudwatch;
pub mod error;
pub mod fetcher;
pub mod publisher;
pub mod sns;

pub use backend::{MetricsBackend, StatisticsRequest};
pub use channel::NotificationChannel;
pub use cloudwatch::CloudWatchBackend;
pub use error::{AlertError, CloudError};
pub use fetcher::MetricFetcher;
pub use publisher::AlertPublisher;
pub use sns::SnsChannel;

/// Load the shared AWS SDK configuration for `region`.
///
/// Credentials come from the default provider chain (environment, profile,
/// instance metadata).
pub async fn load_sdk_config(region: &str) -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_owned()))
        .load()
        .await
}
