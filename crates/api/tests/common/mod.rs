#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cloudpulse_api::config::ServerConfig;
use cloudpulse_api::router::build_app_router;
use cloudpulse_api::state::AppState;
use cloudpulse_cloud::{
    AlertPublisher, CloudError, MetricFetcher, MetricsBackend, NotificationChannel,
    StatisticsRequest,
};
use cloudpulse_core::catalog::ResourceDimensions;
use cloudpulse_core::metric::{Datapoint, MetricDescriptor, MetricQuery};
use cloudpulse_core::types::Timestamp;

pub const INSTANCE_ID: &str = "i-0123456789abcdef0";

/// A base time on a whole minute so serialized timestamps are predictable.
pub const BASE_SECS: i64 = 1_700_000_040;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// In-memory metrics backend keyed by metric name.
#[derive(Default)]
pub struct FakeBackend {
    series: HashMap<String, Vec<Datapoint>>,
    failing: HashSet<String>,
    listing: Vec<MetricDescriptor>,
    listing_fails: bool,
    queries: Mutex<Vec<MetricQuery>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, metric_name: &str, datapoints: Vec<Datapoint>) -> Self {
        self.series.insert(metric_name.to_string(), datapoints);
        self
    }

    /// Make every statistics query for `metric_name` fail.
    pub fn failing(mut self, metric_name: &str) -> Self {
        self.failing.insert(metric_name.to_string());
        self
    }

    pub fn with_listing(mut self, descriptors: Vec<MetricDescriptor>) -> Self {
        self.listing = descriptors;
        self
    }

    pub fn listing_fails(mut self) -> Self {
        self.listing_fails = true;
        self
    }

    /// Every query received so far, in arrival order.
    pub fn queries(&self) -> Vec<MetricQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// The single query received for `metric_name`.
    pub fn query_for(&self, metric_name: &str) -> MetricQuery {
        let matching: Vec<_> = self
            .queries()
            .into_iter()
            .filter(|q| q.metric_name == metric_name)
            .collect();
        assert_eq!(matching.len(), 1, "expected one query for {metric_name}");
        matching.into_iter().next().unwrap()
    }
}

#[async_trait]
impl MetricsBackend for FakeBackend {
    async fn get_statistics(
        &self,
        request: StatisticsRequest<'_>,
    ) -> Result<Vec<Datapoint>, CloudError> {
        let query = request.query;
        self.queries.lock().unwrap().push(query.clone());

        if self.failing.contains(&query.metric_name) {
            return Err(CloudError::Backend {
                operation: "GetMetricStatistics",
                message: "Throttling: Rate exceeded".into(),
            });
        }
        Ok(self
            .series
            .get(&query.metric_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_metrics(
        &self,
        _namespace: &str,
        _metric_name: &str,
    ) -> Result<Vec<MetricDescriptor>, CloudError> {
        if self.listing_fails {
            return Err(CloudError::Backend {
                operation: "ListMetrics",
                message: "AccessDenied".into(),
            });
        }
        Ok(self.listing.clone())
    }
}

/// Notification channel that records every publish.
#[derive(Default)]
pub struct RecordingChannel {
    pub fail: bool,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingChannel {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    async fn publish(&self, subject: &str, message: &str) -> Result<Option<String>, CloudError> {
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_string(), message.to_string()));
        if self.fail {
            return Err(CloudError::Publish("AuthorizationError".into()));
        }
        Ok(Some("00000000-0000-0000-0000-000000000001".into()))
    }
}

// ---------------------------------------------------------------------------
// Datapoint helpers
// ---------------------------------------------------------------------------

pub fn at(offset_secs: i64) -> Timestamp {
    chrono::DateTime::from_timestamp(BASE_SECS + offset_secs, 0).unwrap()
}

pub fn avg(offset_secs: i64, value: f64) -> Datapoint {
    Datapoint {
        timestamp: Some(at(offset_secs)),
        average: Some(value),
        ..Default::default()
    }
}

pub fn sum(offset_secs: i64, value: f64) -> Datapoint {
    Datapoint {
        timestamp: Some(at(offset_secs)),
        sum: Some(value),
        ..Default::default()
    }
}

/// RFC 3339 form of [`at`] as it appears in response bodies.
pub fn time_json(offset_secs: i64) -> String {
    serde_json::to_value(at(offset_secs))
        .unwrap()
        .as_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:3000")],
        request_timeout_secs: 30,
        aws_region: "us-east-1".to_string(),
        sns_topic_arn: "arn:aws:sns:us-east-1:123456789012:ec2-alerts".to_string(),
        resource: ResourceDimensions::for_instance(INSTANCE_ID),
    }
}

/// Build the full application router over the given fakes.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack.
pub fn build_test_app(backend: Arc<FakeBackend>, channel: Arc<RecordingChannel>) -> Router {
    build_app_router(AppState {
        config: Arc::new(test_config()),
        fetcher: MetricFetcher::new(backend),
        publisher: AlertPublisher::new(channel),
    })
}

/// Shorthand for an app whose channel is never expected to be used.
pub fn app_with_backend(backend: FakeBackend) -> (Router, Arc<FakeBackend>) {
    let backend = Arc::new(backend);
    let app = build_test_app(backend.clone(), Arc::new(RecordingChannel::default()));
    (app, backend)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, &body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
