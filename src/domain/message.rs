use time::OffsetDateTime;
use uuid::Uuid;

/// A stored message. Created once by the storage gateway and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub recipient: String,
    pub sender: Option<String>,
    pub content: String,
    pub image: Option<String>,
    pub created_at: OffsetDateTime,
}

/// A validated submission that has not been persisted yet.
///
/// Only [`NewMessage::new`] builds one, so `recipient` and `content` are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    recipient: String,
    sender: Option<String>,
    content: String,
    image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Recipient and content are required.")]
pub struct MissingRequiredFields;

impl NewMessage {
    /// Builds a submission, rejecting a missing or empty recipient or content.
    ///
    /// # Errors
    /// Returns `MissingRequiredFields` if either required field is absent or empty.
    pub fn new(
        recipient: Option<String>,
        sender: Option<String>,
        content: Option<String>,
        image: Option<String>,
    ) -> Result<Self, MissingRequiredFields> {
        match (recipient, content) {
            (Some(recipient), Some(content)) if !recipient.is_empty() && !content.is_empty() => {
                Ok(Self { recipient, sender, content, image })
            }
            _ => Err(MissingRequiredFields),
        }
    }

    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Completes the record with the identifiers the store assigns at insertion.
    #[must_use]
    pub fn into_message(self, id: Uuid, created_at: OffsetDateTime) -> Message {
        Message {
            id,
            recipient: self.recipient,
            sender: self.sender,
            content: self.content,
            image: self.image,
            created_at,
        }
    }
}
