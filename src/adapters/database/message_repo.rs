use crate::adapters::database::records::MessageRecord;
use crate::domain::message::{Message, NewMessage};
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct MessageRepository {}

impl MessageRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Records a new message and returns the id the database generated for it.
    ///
    /// Text columns hold raw UTF-8 bytes so that strings containing NUL are stored as given.
    ///
    /// # Errors
    /// Returns `sqlx::Error` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, conn, message), fields(recipient = %message.recipient()))]
    pub(crate) async fn create(
        &self,
        conn: &mut PgConnection,
        message: &NewMessage,
        created_at: OffsetDateTime,
    ) -> Result<Uuid, sqlx::Error> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO messages (recipient, sender, content, image, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(message.recipient().as_bytes())
        .bind(message.sender().map(str::as_bytes))
        .bind(message.content().as_bytes())
        .bind(message.image().map(str::as_bytes))
        .bind(created_at)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    /// Fetches the full history for a recipient, newest first.
    ///
    /// Messages sharing a timestamp come back with the later insert first.
    ///
    /// # Errors
    /// Returns `sqlx::Error` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn fetch_by_recipient(
        &self,
        conn: &mut PgConnection,
        recipient: &str,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, recipient, sender, content, image, created_at
            FROM messages
            WHERE recipient = $1
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .bind(recipient.as_bytes())
        .fetch_all(conn)
        .await?;

        records.into_iter().map(Message::try_from).collect()
    }
}
