use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{Chat, Message};
use crate::services::validation::{validate_chat_title, validate_message_text, ValidationError};

/// Body of `POST /chats/`. A missing `title` decodes as empty and is then
/// rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateChatRequest {
    #[serde(default)]
    pub title: String,
}

impl CreateChatRequest {
    /// Trim and check `title`, replacing it with the normalized value on success.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.title = validate_chat_title(&self.title)?;
        Ok(())
    }
}

/// Body of `POST /chats/{id}/messages/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub text: String,
}

impl CreateMessageRequest {
    /// Trim and check `text`, replacing it with the normalized value on success.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.text = validate_message_text(&self.text)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub id: i64,
    pub title: String,
    pub created_at: String,
    /// Newest first; omitted when no messages were loaded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub id: i64,
    pub chat_id: i64,
    pub text: String,
    pub created_at: String,
}

/// Body returned with a 400 when a field fails validation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl Chat {
    pub fn to_response(&self) -> ChatResponse {
        ChatResponse {
            id: self.id,
            title: self.title.clone(),
            created_at: self.created_at.to_rfc3339(),
            messages: self.messages.iter().map(Message::to_response).collect(),
        }
    }
}

impl Message {
    pub fn to_response(&self) -> MessageResponse {
        MessageResponse {
            id: self.id,
            chat_id: self.chat_id,
            text: self.text.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}
