use crate::domain::message::Message;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Body of `POST /messages`. Every field is optional on the wire so that a missing
/// recipient or content is reported as a validation error rather than a parse error.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitMessageRequest {
    pub recipient: Option<String>,
    pub sender: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitMessageResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub recipient: String,
    pub sender: Option<String>,
    pub content: String,
    pub image: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            recipient: message.recipient,
            sender: message.sender,
            content: message.content,
            image: message.image,
            created_at: message.created_at,
        }
    }
}
