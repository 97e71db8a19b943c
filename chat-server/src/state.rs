//! Shared application state injected into every Axum handler.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::services::ChatService;

/// State shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Chat use-cases; built once at startup around the database store.
    pub chats: Arc<dyn ChatService>,
    /// When the state was assembled, reported by `/health`.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config, chats: Arc<dyn ChatService>) -> Self {
        Self {
            config: Arc::new(config),
            chats,
            started_at: Instant::now(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}
