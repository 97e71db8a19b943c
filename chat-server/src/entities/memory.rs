//! In-memory [`ChatStore`] / [`MessageStore`] used by service and route tests.
//!
//! Records every call so tests can assert on what reached the store, and can
//! be told to fail the next operations with a storage error.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::entities::{Chat, ChatStore, Message, MessageStore, NewChat, NewMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    CreateChat(String),
    GetChat { id: i64, limit: i64 },
    DeleteChat(i64),
    CreateMessage { chat_id: i64, text: String },
}

#[derive(Default)]
struct Inner {
    chats: Vec<Chat>,
    messages: Vec<Message>,
    next_id: i64,
    calls: Vec<StoreCall>,
    fail: bool,
}

/// Clones share the same tables, like clones of a connection pool.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with a pool error.
    pub fn fail_all(&self) {
        self.inner.lock().unwrap().fail = true;
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn message_count(&self, chat_id: i64) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.messages.iter().filter(|m| m.chat_id == chat_id).count()
    }

    fn record(&self, call: StoreCall) -> Result<std::sync::MutexGuard<'_, Inner>, sqlx::Error> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(inner)
    }
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl ChatStore for MemoryStore {
    async fn create_chat(&self, chat: NewChat) -> Result<Chat, sqlx::Error> {
        let mut inner = self.record(StoreCall::CreateChat(chat.title.clone()))?;
        let created = Chat {
            id: inner.next_id(),
            title: chat.title,
            created_at: Utc::now(),
            messages: Vec::new(),
        };
        inner.chats.push(created.clone());
        Ok(created)
    }

    async fn get_chat(&self, id: i64, message_limit: i64) -> Result<Option<Chat>, sqlx::Error> {
        let inner = self.record(StoreCall::GetChat { id, limit: message_limit })?;
        let Some(chat) = inner.chats.iter().find(|c| c.id == id) else {
            return Ok(None);
        };

        // Ids are handed out in insertion order, so id order is age order.
        let mut messages: Vec<Message> =
            inner.messages.iter().filter(|m| m.chat_id == id).cloned().collect();
        messages.sort_by(|a, b| b.id.cmp(&a.id));
        if message_limit >= 0 {
            messages.truncate(message_limit as usize);
        }

        Ok(Some(Chat { messages, ..chat.clone() }))
    }

    async fn delete_chat(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut inner = self.record(StoreCall::DeleteChat(id))?;
        inner.chats.retain(|c| c.id != id);
        inner.messages.retain(|m| m.chat_id != id);
        Ok(())
    }
}

impl MessageStore for MemoryStore {
    async fn create_message(&self, msg: NewMessage) -> Result<Message, sqlx::Error> {
        let mut inner = self.record(StoreCall::CreateMessage {
            chat_id: msg.chat_id,
            text: msg.text.clone(),
        })?;
        let created = Message {
            id: inner.next_id(),
            chat_id: msg.chat_id,
            text: msg.text,
            created_at: Utc::now(),
        };
        inner.messages.push(created.clone());
        Ok(created)
    }
}
