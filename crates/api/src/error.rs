use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cloudpulse_cloud::{AlertError, CloudError};
use cloudpulse_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the form `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cloudpulse_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A metrics backend call failed. `message` is the fixed text shown to
    /// the caller; `details` carries the backend error when enabled.
    #[error("{message}: {source}")]
    Upstream {
        message: &'static str,
        source: CloudError,
        expose_details: bool,
    },

    /// The notification channel failed.
    #[error("Failed to send alert: {0}")]
    Publish(CloudError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Wrap a backend failure under an endpoint's fixed message.
    pub fn upstream(message: &'static str, source: CloudError, expose_details: bool) -> Self {
        Self::Upstream {
            message,
            source,
            expose_details,
        }
    }
}

impl From<AlertError> for AppError {
    fn from(err: AlertError) -> Self {
        match err {
            AlertError::Validation(core) => AppError::Core(core),
            AlertError::Publish(cloud) => AppError::Publish(cloud),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Core(CoreError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "code": "VALIDATION_ERROR" }),
            ),
            AppError::Upstream {
                message,
                source,
                expose_details,
            } => {
                tracing::error!(error = %source, response = *message, "Metrics backend query failed");
                let mut body = json!({ "error": message, "code": "BACKEND_ERROR" });
                if *expose_details {
                    body["details"] = json!(source.to_string());
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            AppError::Publish(source) => {
                tracing::error!(error = %source, "Failed to send alert");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to send alert", "code": "PUBLISH_ERROR" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
