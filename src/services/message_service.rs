use crate::adapters::StorageGateway;
use crate::domain::message::{Message, NewMessage};
use crate::error::Result;
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) submitted_total: Counter<u64>,
    pub(crate) list_size: Histogram<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("message-board-server");
        Self {
            submitted_total: meter
                .u64_counter("board_messages_submitted_total")
                .with_description("Message submissions by outcome")
                .build(),
            list_size: meter
                .u64_histogram("board_message_list_size")
                .with_description("Number of messages returned for a recipient")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MessageService {
    store: Arc<dyn StorageGateway>,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(store: Arc<dyn StorageGateway>) -> Self {
        Self { store, metrics: Metrics::new() }
    }

    /// Validates and stores a submission.
    ///
    /// # Errors
    /// Returns `AppError::Validation` if the recipient or content is missing or empty.
    /// Returns `AppError::Storage` if the message cannot be stored.
    #[tracing::instrument(err(level = "warn"), skip(self, recipient, sender, content, image))]
    pub async fn submit(
        &self,
        recipient: Option<String>,
        sender: Option<String>,
        content: Option<String>,
        image: Option<String>,
    ) -> Result<Uuid> {
        let message = match NewMessage::new(recipient, sender, content, image) {
            Ok(message) => message,
            Err(e) => {
                self.metrics.submitted_total.add(1, &[KeyValue::new("status", "invalid")]);
                return Err(e.into());
            }
        };

        match self.store.insert(message).await {
            Ok(id) => {
                tracing::debug!(message_id = %id, "Message stored");
                self.metrics.submitted_total.add(1, &[KeyValue::new("status", "success")]);
                Ok(id)
            }
            Err(e) => {
                self.metrics.submitted_total.add(1, &[KeyValue::new("status", "failure")]);
                Err(e.into())
            }
        }
    }

    /// Returns the full history for a recipient, newest first.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the query fails.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn list_for_recipient(&self, recipient: &str) -> Result<Vec<Message>> {
        let messages = self.store.query_by_recipient(recipient).await?;
        self.metrics.list_size.record(messages.len() as u64, &[]);
        Ok(messages)
    }
}
