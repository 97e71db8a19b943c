//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are converted to an HTTP
//! response with the matching status code:
//!
//! | variant      | status | body                          |
//! |--------------|--------|-------------------------------|
//! | `BadRequest` | 400    | plain text message            |
//! | `Validation` | 400    | JSON `{"error": "<message>"}` |
//! | `NotFound`   | 404    | plain text message            |
//! | `Database`   | 500    | plain text, generic           |
//!
//! **Security note:** internal errors are logged with full detail but only a
//! generic message is returned to the caller so that SQL or other
//! implementation details never leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

use crate::schemas::chat::ErrorResponse;
use crate::services::ServiceError;
use crate::services::validation::ValidationError;

pub const INTERNAL_ERROR_BODY: &str = "Internal server error";

/// All errors that can occur in the chat-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request could not be decoded (path segment or body).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A request field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The caller referenced a resource that does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Propagated from the SQLite store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServerError {
    pub fn invalid_chat_id() -> Self {
        Self::BadRequest("Invalid chat ID".to_owned())
    }

    pub fn invalid_body() -> Self {
        Self::BadRequest("Invalid request body".to_owned())
    }
}

impl From<ServiceError> for ServerError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(v) => ServerError::Validation(v),
            e @ ServiceError::NotFound { resource, id } => {
                debug!(resource, id, "resource not found");
                ServerError::NotFound(e.to_string())
            }
            ServiceError::Store(db) => ServerError::Database(db),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m).into_response(),
            ServerError::Validation(v) => {
                debug!(field = v.field, message = %v.message, "request failed validation");
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: v.message })).into_response()
            }
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, m).into_response(),
            ServerError::Database(e) => {
                error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::http::header::CONTENT_TYPE;
    use http_body_util::BodyExt;

    async fn body_of(resp: Response) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn validation_renders_json_error() {
        let err: ServerError = ServiceError::Validation(ValidationError {
            field: "text",
            message: "text cannot be empty".into(),
        })
        .into();
        let resp = err.into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(body_of(resp).await, r#"{"error":"text cannot be empty"}"#);
    }

    #[tokio::test]
    async fn not_found_renders_plain_text() {
        let err: ServerError = ServiceError::chat_not_found(5).into();
        let resp = err.into_response();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers()[CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
        assert_eq!(body_of(resp).await, "chat not found");
    }

    #[tokio::test]
    async fn bad_request_renders_message() {
        let resp = ServerError::invalid_chat_id().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(resp).await, "Invalid chat ID");
    }

    #[tokio::test]
    async fn database_error_is_masked() {
        let err: ServerError =
            ServiceError::Store(sqlx::Error::Protocol("secret table exploded".into())).into();
        let resp = err.into_response();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(resp).await;
        assert_eq!(body, INTERNAL_ERROR_BODY);
        assert!(!body.contains("secret"));
    }
}
