use std::future::Future;

use crate::entities::{parse_timestamp, Chat, Message, NewChat, SqliteStore};

pub trait ChatStore: Send + Sync + 'static {
    /// Insert a chat and return it with the store-assigned `id` and `created_at`.
    fn create_chat(&self, chat: NewChat) -> impl Future<Output = Result<Chat, sqlx::Error>> + Send;

    /// Fetch a chat with at most `message_limit` of its newest messages.
    ///
    /// Returns `Ok(None)` when no chat has this id. The limit is handed to the
    /// database as-is: zero loads no messages, a negative value loads all.
    fn get_chat(
        &self,
        id: i64,
        message_limit: i64,
    ) -> impl Future<Output = Result<Option<Chat>, sqlx::Error>> + Send;

    /// Delete a chat and, through the foreign-key cascade, its messages.
    /// Deleting an id that does not exist is not an error.
    fn delete_chat(&self, id: i64) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

impl ChatStore for SqliteStore {
    async fn create_chat(&self, chat: NewChat) -> Result<Chat, sqlx::Error> {
        let (id, created_at): (i64, String) = sqlx::query_as(
            "INSERT INTO chats (title) VALUES (?1) RETURNING id, created_at",
        )
        .bind(&chat.title)
        .fetch_one(&self.pool)
        .await?;

        Ok(Chat {
            id,
            title: chat.title,
            created_at: parse_timestamp(&created_at, "chats.created_at"),
            messages: Vec::new(),
        })
    }

    async fn get_chat(&self, id: i64, message_limit: i64) -> Result<Option<Chat>, sqlx::Error> {
        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT id, title, created_at FROM chats WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some((id, title, created_at)) = row else {
            return Ok(None);
        };

        let rows: Vec<(i64, i64, String, String)> = sqlx::query_as(
            "SELECT id, chat_id, text, created_at \
             FROM messages WHERE chat_id = ?1 \
             ORDER BY created_at DESC, id DESC LIMIT ?2",
        )
        .bind(id)
        .bind(message_limit)
        .fetch_all(&self.pool)
        .await?;

        let messages = rows
            .into_iter()
            .map(|(id, chat_id, text, created_at)| Message {
                id,
                chat_id,
                text,
                created_at: parse_timestamp(&created_at, "messages.created_at"),
            })
            .collect();

        Ok(Some(Chat {
            id,
            title,
            created_at: parse_timestamp(&created_at, "chats.created_at"),
            messages,
        }))
    }

    async fn delete_chat(&self, id: i64) -> Result<(), sqlx::Error> {
        let result = sqlx::query("DELETE FROM chats WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(chat_id = id, rows = result.rows_affected(), "chat delete executed");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entities::{MessageStore, NewMessage};

    async fn store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:", 1)
            .await
            .expect("in-memory database")
    }

    async fn seed_chat(store: &SqliteStore, title: &str) -> Chat {
        store
            .create_chat(NewChat { title: title.into() })
            .await
            .expect("create chat")
    }

    async fn seed_message(store: &SqliteStore, chat_id: i64, text: &str) -> Message {
        store
            .create_message(NewMessage { chat_id, text: text.into() })
            .await
            .expect("create message")
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamp() {
        let store = store().await;
        let first = seed_chat(&store, "first").await;
        let second = seed_chat(&store, "second").await;

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(first.title, "first");
        assert!(first.messages.is_empty());
    }

    #[tokio::test]
    async fn missing_chat_is_none_not_error() {
        let store = store().await;
        let found = store.get_chat(999, 20).await.expect("query succeeds");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn get_returns_newest_messages_first_up_to_limit() {
        let store = store().await;
        let chat = seed_chat(&store, "history").await;
        for text in ["one", "two", "three", "four"] {
            seed_message(&store, chat.id, text).await;
        }

        let loaded = store.get_chat(chat.id, 2).await.unwrap().expect("chat exists");
        assert_eq!(loaded.id, chat.id);
        assert_eq!(loaded.title, "history");
        let texts: Vec<&str> = loaded.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["four", "three"]);
        assert!(loaded.messages.iter().all(|m| m.chat_id == chat.id));
    }

    #[tokio::test]
    async fn messages_of_other_chats_are_not_loaded() {
        let store = store().await;
        let a = seed_chat(&store, "a").await;
        let b = seed_chat(&store, "b").await;
        seed_message(&store, a.id, "for a").await;
        seed_message(&store, b.id, "for b").await;

        let loaded = store.get_chat(a.id, 10).await.unwrap().unwrap();
        assert_eq!(loaded.messages.len(), 1);
        assert_eq!(loaded.messages[0].text, "for a");
    }

    #[tokio::test]
    async fn zero_limit_loads_no_messages() {
        let store = store().await;
        let chat = seed_chat(&store, "quiet").await;
        seed_message(&store, chat.id, "hello").await;

        let loaded = store.get_chat(chat.id, 0).await.unwrap().unwrap();
        assert!(loaded.messages.is_empty());
    }

    #[tokio::test]
    async fn delete_cascades_to_messages() {
        let store = store().await;
        let chat = seed_chat(&store, "doomed").await;
        let keep = seed_chat(&store, "survivor").await;
        seed_message(&store, chat.id, "bye").await;
        seed_message(&store, chat.id, "bye again").await;
        seed_message(&store, keep.id, "still here").await;

        store.delete_chat(chat.id).await.expect("delete succeeds");

        assert!(store.get_chat(chat.id, 10).await.unwrap().is_none());
        let (orphans,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM messages WHERE chat_id = ?1")
                .bind(chat.id)
                .fetch_one(&store.pool)
                .await
                .unwrap();
        assert_eq!(orphans, 0);

        let survivor = store.get_chat(keep.id, 10).await.unwrap().unwrap();
        assert_eq!(survivor.messages.len(), 1);
    }

    #[tokio::test]
    async fn deleting_unknown_chat_succeeds() {
        let store = store().await;
        store.delete_chat(12345).await.expect("no rows is not an error");
    }
}
