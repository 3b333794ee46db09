use cloudpulse_core::error::CoreError;

/// Errors raised while talking to the metrics backend or notification
/// channel.
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    /// The query was rejected before being sent.
    #[error("Invalid metric query: {0}")]
    InvalidQuery(#[from] CoreError),

    /// The metrics backend failed (unreachable, throttled, access denied).
    #[error("{operation} failed: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// The notification channel refused or failed the publish.
    #[error("Publish failed: {0}")]
    Publish(String),
}

/// Errors returned by [`AlertPublisher::publish`](crate::AlertPublisher::publish).
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    /// The message was rejected before any publish attempt.
    #[error(transparent)]
    Validation(CoreError),

    #[error(transparent)]
    Publish(CloudError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_backend() {
        let err = CloudError::Backend {
            operation: "GetMetricStatistics",
            message: "Throttling: Rate exceeded".into(),
        };
        assert_eq!(
            err.to_string(),
            "GetMetricStatistics failed: Throttling: Rate exceeded"
        );
    }

    #[test]
    fn display_invalid_query() {
        let err = CloudError::from(CoreError::Validation("period_secs must be positive".into()));
        assert_eq!(
            err.to_string(),
            "Invalid metric query: Validation failed: period_secs must be positive"
        );
    }

    #[test]
    fn alert_validation_is_transparent() {
        let err = AlertError::Validation(CoreError::Validation("Message required".into()));
        assert_eq!(err.to_string(), "Validation failed: Message required");
    }
}
