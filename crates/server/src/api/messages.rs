//! 消息 API 路由。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use mercado_api_types::{CreateMessageRequest, MessageRecordResponse};
use mercado_core::domain::{
    ChatId, DomainError, MessageRecord, NewMessage, UserId, required_text,
};
use tracing::info;

use super::error::ApiError;
use super::state::AppState;

/// 创建消息 API 路由。
pub fn create_message_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/mensajes", post(create_message))
        .route("/mensajes/{chat_id}", get(list_chat_messages))
}

fn new_message(request: CreateMessageRequest) -> Result<NewMessage, DomainError> {
    Ok(NewMessage {
        chat_id: required_text("chat_id", request.chat_id)?.into(),
        emisor_id: required_text("emisor_id", request.emisor_id)?.into(),
        contenido: required_text("contenido", request.contenido)?,
    })
}

fn message_response(record: MessageRecord) -> MessageRecordResponse {
    let MessageRecord { id, message } = record;
    MessageRecordResponse {
        id: id.into_inner(),
        chat_id: message.chat_id.map(ChatId::into_inner),
        emisor_id: message.emisor_id.map(UserId::into_inner),
        contenido: message.contenido,
        fecha_envio: message.fecha_envio.map(|fecha| fecha.to_string()),
    }
}

async fn create_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageRecordResponse>), ApiError> {
    let Json(request) = payload?;
    let message = new_message(request)?;
    let chat_id = message.chat_id.clone();

    let record = state
        .messages
        .create(message)
        .await
        .map_err(ApiError::store("Error creando mensaje"))?;

    info!(id = %record.id, %chat_id, "message sent");
    Ok((StatusCode::CREATED, Json(message_response(record))))
}

/// 按发送时间升序列出会话中的消息。
async fn list_chat_messages(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
) -> Result<Json<Vec<MessageRecordResponse>>, ApiError> {
    let messages = state
        .messages
        .list_by_chat(&ChatId::from(chat_id))
        .await
        .map_err(ApiError::store("Error obteniendo mensajes del chat"))?
        .ok_or_else(|| ApiError::not_found("No hay mensajes para este chat"))?;

    Ok(Json(messages.into_iter().map(message_response).collect()))
}
