//! Database abstraction layer.
//!
//! [`ChatStore`] and [`MessageStore`] define the persistence interface the
//! service layer depends on. The default implementation is [`SqliteStore`].
//! To swap to another database, implement both traits for your new type and
//! hand it to [`crate::services::DefaultChatService`].
//!
//! All trait methods return `impl Future + Send`.

pub mod chat;
pub mod dao;
#[cfg(test)]
pub mod memory;
pub mod message;

pub use dao::{Chat, Message, NewChat, NewMessage};

pub use chat::ChatStore;
pub use message::MessageStore;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// SQLite-backed store for chats and messages.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g. `"sqlite://chat.db"`
    /// or `"sqlite::memory:"` for tests. Foreign keys are enforced on every
    /// connection so that deleting a chat cascades to its messages.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every in-memory connection is its own database, so keep exactly one
        // alive for the lifetime of the pool.
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

/// Parse a stored timestamp, logging and substituting "now" when the text is
/// not valid RFC 3339.
pub(crate) fn parse_timestamp(raw: &str, column: &str) -> DateTime<Utc> {
    raw.parse().unwrap_or_else(|e: chrono::ParseError| {
        tracing::warn!(raw = %raw, column, error = %e, "failed to parse timestamp; using now");
        Utc::now()
    })
}
