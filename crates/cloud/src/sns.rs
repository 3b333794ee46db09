//! [`NotificationChannel`] backed by an Amazon SNS topic.

use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;

use crate::channel::NotificationChannel;
use crate::error::CloudError;

pub struct SnsChannel {
    client: Client,
    topic_arn: String,
}

impl SnsChannel {
    pub fn new(client: Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }

    pub fn from_conf(config: &aws_config::SdkConfig, topic_arn: impl Into<String>) -> Self {
        Self::new(Client::new(config), topic_arn)
    }

    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }
}

#[async_trait]
impl NotificationChannel for SnsChannel {
    async fn publish(&self, subject: &str, message: &str) -> Result<Option<String>, CloudError> {
        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| CloudError::Publish(DisplayErrorContext(&e).to_string()))?;

        Ok(output.message_id().map(str::to_string))
    }
}
