use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::FutureProducer;
use rdkafka::producer::FutureRecord;
use rdkafka::util::Timeout;
use thiserror::Error;

use crate::config::KafkaConfig;
use crate::domain::credentials::errors::NotificationError;
use crate::domain::credentials::models::PasswordResetNotification;
use crate::domain::credentials::ports::PasswordResetNotifier;
use crate::outbound::notifications::messages::NotificationMessage;

#[derive(Debug, Error)]
pub enum KafkaProducerError {
    #[error("Failed to send message to Kafka: {0}")]
    SendError(String),

    #[error("Failed to serialize message: {0}")]
    SerializationError(String),
}

impl From<KafkaProducerError> for NotificationError {
    fn from(err: KafkaProducerError) -> Self {
        match err {
            KafkaProducerError::SerializationError(msg) => {
                NotificationError::SerializationFailed(msg)
            }
            KafkaProducerError::SendError(msg) => NotificationError::PublishFailed(msg),
        }
    }
}

/// Hands password-reset tokens to the mail-delivery service through Kafka.
pub struct KafkaResetNotifier {
    producer: FutureProducer,
    topic: String,
    timeout: Duration,
}

impl KafkaResetNotifier {
    /// Create a new Kafka notifier with "at least once" delivery semantics
    ///
    /// # Arguments
    /// * `config` - Kafka section of the application configuration
    ///
    /// # Notes:
    /// - `acks=all`: Wait for all in-sync replicas to acknowledge
    /// - `enable.idempotence=true`: Prevents duplicate messages during retries
    /// - `message.timeout.ms=10000`: Reset requests are interactive, so give up sooner
    pub fn new(config: &KafkaConfig) -> Result<Self, anyhow::Error> {
        tracing::info!(
            brokers = %config.brokers,
            topic = %config.topic,
            "Initializing Kafka producer for notifications"
        );

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "10000")
            .set("enable.idempotence", "true")
            .set("acks", "all")
            .set("retries", "5")
            .set("retry.backoff.ms", "100")
            .create()?;

        Ok(Self {
            producer,
            topic: config.topic.to_string(),
            timeout: Duration::from_secs(10),
        })
    }

    /// Publish a message keyed by user id so a user's notifications stay ordered.
    ///
    /// The payload carries a live token; it is never logged.
    async fn publish(
        &self,
        user_id: &str,
        message: &NotificationMessage,
    ) -> Result<(), KafkaProducerError> {
        let payload = serde_json::to_string(message)
            .map_err(|e| KafkaProducerError::SerializationError(e.to_string()))?;

        let record = FutureRecord::to(&self.topic)
            .key(user_id)
            .payload(&payload);

        self.producer
            .send(record, Timeout::After(self.timeout))
            .await
            .map(|_| {
                tracing::debug!(
                    topic = %self.topic,
                    user_id = %user_id,
                    "Notification published"
                );
            })
            .map_err(|(err, _)| KafkaProducerError::SendError(err.to_string()))
    }
}

#[async_trait]
impl PasswordResetNotifier for KafkaResetNotifier {
    async fn send_password_reset(
        &self,
        notification: &PasswordResetNotification,
    ) -> Result<(), NotificationError> {
        let message = NotificationMessage::from(notification);
        let user_id = notification.user_id.to_string();

        self.publish(&user_id, &message).await.map_err(|e| {
            tracing::error!(
                user_id = %user_id,
                error = %e,
                "Failed to publish PasswordResetRequested notification"
            );
            e.into()
        })
    }
}
