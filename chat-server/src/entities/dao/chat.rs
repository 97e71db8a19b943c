use chrono::{DateTime, Utc};

use super::Message;

/// A row in the `chats` table, optionally carrying its loaded messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Chat {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// Newest first. Empty unless the chat was fetched together with its messages.
    pub messages: Vec<Message>,
}

/// Values needed to insert a chat; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChat {
    pub title: String,
}
