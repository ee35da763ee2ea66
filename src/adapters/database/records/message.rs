use crate::domain::message::Message;
use time::OffsetDateTime;
use uuid::Uuid;

/// Row of the `messages` table. String fields are stored as UTF-8 `BYTEA`.
#[derive(Debug, sqlx::FromRow)]
pub struct MessageRecord {
    pub(crate) id: Uuid,
    pub(crate) recipient: Vec<u8>,
    pub(crate) sender: Option<Vec<u8>>,
    pub(crate) content: Vec<u8>,
    pub(crate) image: Option<Vec<u8>>,
    pub(crate) created_at: OffsetDateTime,
}

fn decode_text(column: &str, bytes: Vec<u8>) -> Result<String, sqlx::Error> {
    String::from_utf8(bytes).map_err(|e| sqlx::Error::ColumnDecode { index: column.to_string(), source: Box::new(e) })
}

impl TryFrom<MessageRecord> for Message {
    type Error = sqlx::Error;

    fn try_from(record: MessageRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            recipient: decode_text("recipient", record.recipient)?,
            sender: record.sender.map(|b| decode_text("sender", b)).transpose()?,
            content: decode_text("content", record.content)?,
            image: record.image.map(|b| decode_text("image", b)).transpose()?,
            created_at: record.created_at,
        })
    }
}
