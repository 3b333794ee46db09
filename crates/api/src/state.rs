use std::sync::Arc;

use cloudpulse_cloud::{AlertPublisher, MetricFetcher};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Reads series from the metrics backend.
    pub fetcher: MetricFetcher,
    /// Publishes to the notification channel.
    pub publisher: AlertPublisher,
}
