use cloudpulse_cloud::{AlertError, CloudError};

/// Errors that end a check run early.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// CPU utilization could not be fetched.
    #[error("Error fetching metrics: {0}")]
    Fetch(#[from] CloudError),

    /// The breach notification could not be sent.
    #[error("Error sending alert: {0}")]
    Alert(#[from] AlertError),
}
