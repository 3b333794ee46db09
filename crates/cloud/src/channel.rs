use async_trait::async_trait;

use crate::error::CloudError;

/// A pub/sub topic that fans a message out to its subscribers.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Publish `message` under `subject`. Returns the channel's message id
    /// when it reports one.
    async fn publish(&self, subject: &str, message: &str) -> Result<Option<String>, CloudError>;
}
