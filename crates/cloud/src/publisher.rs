//! Alert Publisher shared by the manual alert endpoint and the scheduled
//! CPU check.

use std::sync::Arc;

use cloudpulse_core::alert::validate_message;

use crate::channel::NotificationChannel;
use crate::error::AlertError;

#[derive(Clone)]
pub struct AlertPublisher {
    channel: Arc<dyn NotificationChannel>,
}

impl AlertPublisher {
    pub fn new(channel: Arc<dyn NotificationChannel>) -> Self {
        Self { channel }
    }

    /// Validate `message` and forward it to the channel under `subject`.
    ///
    /// Blank messages fail with [`AlertError::Validation`] and never reach
    /// the channel. Every accepted call produces exactly one publish; there
    /// is no retry and no de-duplication.
    pub async fn publish(&self, subject: &str, message: &str) -> Result<Option<String>, AlertError> {
        validate_message(message).map_err(AlertError::Validation)?;

        match self.channel.publish(subject, message).await {
            Ok(message_id) => {
                tracing::info!(subject, message_id = message_id.as_deref(), "Alert published");
                Ok(message_id)
            }
            Err(e) => {
                tracing::error!(subject, error = %e, "Alert publish failed");
                Err(AlertError::Publish(e))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
