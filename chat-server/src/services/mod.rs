//! Orchestration layer between the HTTP routes and the stores.

pub mod chat;
pub mod error;
pub mod validation;

pub use chat::{ChatService, DefaultChatService};
pub use error::ServiceError;
