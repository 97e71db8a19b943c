//! Chat and message routes.
//!
//! Path ids are parsed by hand so that a malformed id is rejected with
//! `Invalid chat ID` before the body is even looked at. Bodies are read as
//! raw bytes and decoded as JSON whatever `Content-Type` says.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use tracing::debug;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::chat::{
    ChatResponse, CreateChatRequest, CreateMessageRequest, ErrorResponse, MessageResponse,
};
use crate::state::AppState;

/// Message limit used when `limit` is absent or not a positive integer.
pub const DEFAULT_MESSAGE_LIMIT: i64 = 20;

#[derive(OpenApi)]
#[openapi(
    paths(create_chat, create_message, get_chat, delete_chat),
    components(schemas(
        CreateChatRequest,
        CreateMessageRequest,
        ChatResponse,
        MessageResponse,
        ErrorResponse
    ))
)]
pub struct ChatsApi;

/// Register chat routes. The trailing-slash forms are canonical; the bare
/// forms are accepted as aliases.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chats/",                post(create_chat))
        .route("/chats",                 post(create_chat))
        .route("/chats/{id}",            get(get_chat).delete(delete_chat))
        .route("/chats/{id}/messages/",  post(create_message))
        .route("/chats/{id}/messages",   post(create_message))
}

fn parse_chat_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse().map_err(|_| ServerError::invalid_chat_id())
}

/// First `limit` pair in the query string, if any.
fn first_limit(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "limit")
        .map(|(_, value)| value.as_str())
}

/// Absent, non-numeric and non-positive values all fall back to the default.
fn parse_limit(raw: Option<&str>) -> i64 {
    match raw.and_then(|s| s.parse::<i64>().ok()) {
        Some(n) if n >= 1 => n,
        _ => DEFAULT_MESSAGE_LIMIT,
    }
}

fn decode_body<T: DeserializeOwned>(
    body: Result<Bytes, BytesRejection>,
) -> Result<T, ServerError> {
    let bytes = body.map_err(|rejection| {
        debug!(error = %rejection, "failed to read request body");
        ServerError::invalid_body()
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        debug!(error = %e, "rejecting request body");
        ServerError::invalid_body()
    })
}

// ── Handlers ──────────────────────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/chats/",
    tag = "chats",
    request_body = CreateChatRequest,
    responses(
        (status = 201, description = "Chat created", body = ChatResponse),
        (status = 400, description = "Malformed body or invalid title", body = ErrorResponse),
        (status = 500, description = "Storage failure"),
    )
)]
pub async fn create_chat(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<ChatResponse>), ServerError> {
    let req: CreateChatRequest = decode_body(body)?;
    let chat = state.chats.create_chat(req).await?;
    Ok((StatusCode::CREATED, Json(chat.to_response())))
}

#[utoipa::path(
    post,
    path = "/chats/{id}/messages/",
    tag = "chats",
    params(("id" = i64, Path, description = "Chat id")),
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Message created", body = MessageResponse),
        (status = 400, description = "Bad chat id, malformed body or invalid text", body = ErrorResponse),
        (status = 404, description = "Chat not found"),
        (status = 500, description = "Storage failure"),
    )
)]
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ServerError> {
    let chat_id = parse_chat_id(&id)?;
    let req: CreateMessageRequest = decode_body(body)?;
    let message = state.chats.create_message(chat_id, req).await?;
    Ok((StatusCode::CREATED, Json(message.to_response())))
}

#[utoipa::path(
    get,
    path = "/chats/{id}",
    tag = "chats",
    params(
        ("id" = i64, Path, description = "Chat id"),
        ("limit" = Option<i64>, Query, description = "Newest messages to include (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Chat with its newest messages", body = ChatResponse),
        (status = 400, description = "Bad chat id"),
        (status = 404, description = "Chat not found"),
        (status = 500, description = "Storage failure"),
    )
)]
pub async fn get_chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ChatResponse>, ServerError> {
    let chat_id = parse_chat_id(&id)?;
    let limit = match &query {
        Ok(Query(pairs)) => parse_limit(first_limit(pairs)),
        Err(_) => DEFAULT_MESSAGE_LIMIT,
    };
    let chat = state.chats.get_chat_with_messages(chat_id, limit).await?;
    Ok(Json(chat.to_response()))
}

#[utoipa::path(
    delete,
    path = "/chats/{id}",
    tag = "chats",
    params(("id" = i64, Path, description = "Chat id")),
    responses(
        (status = 204, description = "Chat deleted (or never existed)"),
        (status = 400, description = "Bad chat id"),
        (status = 500, description = "Storage failure"),
    )
)]
pub async fn delete_chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let chat_id = parse_chat_id(&id)?;
    state.chats.delete_chat(chat_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
