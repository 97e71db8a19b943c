use std::future::Future;

use crate::entities::{parse_timestamp, Message, NewMessage, SqliteStore};

pub trait MessageStore: Send + Sync + 'static {
    /// Insert a message and return it with the store-assigned `id` and
    /// `created_at`. The owning chat is not checked here; a dangling
    /// `chat_id` surfaces as a foreign-key error from the database.
    fn create_message(
        &self,
        msg: NewMessage,
    ) -> impl Future<Output = Result<Message, sqlx::Error>> + Send;
}

impl MessageStore for SqliteStore {
    async fn create_message(&self, msg: NewMessage) -> Result<Message, sqlx::Error> {
        let (id, created_at): (i64, String) = sqlx::query_as(
            "INSERT INTO messages (chat_id, text) VALUES (?1, ?2) RETURNING id, created_at",
        )
        .bind(msg.chat_id)
        .bind(&msg.text)
        .fetch_one(&self.pool)
        .await?;

        Ok(Message {
            id,
            chat_id: msg.chat_id,
            text: msg.text,
            created_at: parse_timestamp(&created_at, "messages.created_at"),
        })
    }
}
