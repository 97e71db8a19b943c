//! Chat use-cases: validation, existence checks and limit clamping on top of
//! the chat and message stores.

use async_trait::async_trait;
use tracing::debug;

use crate::entities::{Chat, ChatStore, Message, MessageStore, NewChat, NewMessage};
use crate::schemas::chat::{CreateChatRequest, CreateMessageRequest};
use crate::services::ServiceError;

/// Most messages a single fetch may load.
pub const MAX_MESSAGE_LIMIT: i64 = 100;

/// The operations the HTTP layer drives.
///
/// Object safe so that handlers can hold an `Arc<dyn ChatService>` and tests
/// can swap in a fake.
#[async_trait]
pub trait ChatService: Send + Sync + 'static {
    async fn create_chat(&self, req: CreateChatRequest) -> Result<Chat, ServiceError>;

    async fn create_message(
        &self,
        chat_id: i64,
        req: CreateMessageRequest,
    ) -> Result<Message, ServiceError>;

    async fn get_chat_with_messages(&self, id: i64, limit: i64) -> Result<Chat, ServiceError>;

    async fn delete_chat(&self, id: i64) -> Result<(), ServiceError>;
}

/// [`ChatService`] backed by a chat store and a message store.
///
/// In production both are the same [`crate::entities::SqliteStore`].
#[derive(Debug, Clone)]
pub struct DefaultChatService<C, M> {
    chats: C,
    messages: M,
}

impl<C, M> DefaultChatService<C, M>
where
    C: ChatStore,
    M: MessageStore,
{
    pub fn new(chats: C, messages: M) -> Self {
        Self { chats, messages }
    }
}

#[async_trait]
impl<C, M> ChatService for DefaultChatService<C, M>
where
    C: ChatStore,
    M: MessageStore,
{
    async fn create_chat(&self, mut req: CreateChatRequest) -> Result<Chat, ServiceError> {
        req.validate()?;

        let chat = self.chats.create_chat(NewChat { title: req.title }).await?;
        debug!(chat_id = chat.id, "chat created");
        Ok(chat)
    }

    async fn create_message(
        &self,
        chat_id: i64,
        mut req: CreateMessageRequest,
    ) -> Result<Message, ServiceError> {
        req.validate()?;

        // Only existence matters here, so load as few messages as possible.
        if self.chats.get_chat(chat_id, 1).await?.is_none() {
            return Err(ServiceError::chat_not_found(chat_id));
        }

        let message = self
            .messages
            .create_message(NewMessage { chat_id, text: req.text })
            .await?;
        debug!(chat_id, message_id = message.id, "message created");
        Ok(message)
    }

    async fn get_chat_with_messages(&self, id: i64, limit: i64) -> Result<Chat, ServiceError> {
        let limit = limit.min(MAX_MESSAGE_LIMIT);

        self.chats
            .get_chat(id, limit)
            .await?
            .ok_or_else(|| ServiceError::chat_not_found(id))
    }

    async fn delete_chat(&self, id: i64) -> Result<(), ServiceError> {
        self.chats.delete_chat(id).await?;
        Ok(())
    }
}
