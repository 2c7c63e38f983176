//! 会话 API 路由。
//!
//! `GET /chats/{id}` 中的 `id` 是用户 ID，`DELETE /chats/{id}` 中的是会话 ID。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use mercado_api_types::{ChatResponse, CreateChatRequest, MessageResponse};
use mercado_core::domain::{
    ChatId, ChatRecord, DomainError, NewChat, ProductId, UserId, required_text,
};
use tracing::info;

use super::error::ApiError;
use super::state::AppState;

/// 创建会话 API 路由。
pub fn create_chat_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chats", post(create_chat))
        .route("/chats/{id}", get(list_user_chats).delete(delete_chat))
}

fn new_chat(request: CreateChatRequest) -> Result<NewChat, DomainError> {
    Ok(NewChat {
        producto_id: required_text("producto_id", request.producto_id)?.into(),
        ofertante_id: required_text("ofertante_id", request.ofertante_id)?.into(),
        interesado_id: required_text("interesado_id", request.interesado_id)?.into(),
    })
}

fn chat_response(record: ChatRecord) -> ChatResponse {
    let ChatRecord { id, chat } = record;
    ChatResponse {
        id: id.into_inner(),
        producto_id: chat.producto_id.map(ProductId::into_inner),
        ofertante_id: chat.ofertante_id.map(UserId::into_inner),
        interesado_id: chat.interesado_id.map(UserId::into_inner),
        fecha_creacion: chat.fecha_creacion.map(|fecha| fecha.to_string()),
    }
}

/// 列出用户参与的全部会话（作为卖家或买家）。
async fn list_user_chats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ChatResponse>>, ApiError> {
    let chats = state
        .chats
        .list_by_participant(&UserId::from(user_id))
        .await
        .map_err(ApiError::store("Error obteniendo chats del usuario"))?
        .ok_or_else(|| ApiError::not_found("No hay chats para este usuario"))?;

    Ok(Json(chats.into_iter().map(chat_response).collect()))
}

async fn create_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateChatRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ChatResponse>), ApiError> {
    let Json(request) = payload?;
    let chat = new_chat(request)?;
    let producto_id = chat.producto_id.clone();

    let record = state
        .chats
        .create(chat)
        .await
        .map_err(ApiError::store("Error creando chat"))?;

    info!(id = %record.id, %producto_id, "chat created");
    Ok((StatusCode::CREATED, Json(chat_response(record))))
}

/// 删除会话。会话中的消息保留。
async fn delete_chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ChatId::from(id);
    let deleted = state
        .chats
        .delete(&id)
        .await
        .map_err(ApiError::store("Error eliminando chat"))?;

    if !deleted {
        return Err(ApiError::not_found("Chat no encontrado"));
    }

    info!(%id, "chat deleted");
    Ok(Json(MessageResponse::new("Chat eliminado correctamente")))
}
