use thiserror::Error;

use crate::services::validation::ValidationError;

/// Failure kinds produced by the chat service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Bad client input; raised before any store access.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced resource does not exist.
    #[error("{resource} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// Anything the store reported, passed through as-is.
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn chat_not_found(id: i64) -> Self {
        Self::NotFound { resource: "chat", id }
    }
}
