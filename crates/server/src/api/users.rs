//! 用户 API 路由。
//!
//! 密码只写入存储，任何响应都不会包含 `contrasena`。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use mercado_api_types::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserResponse};
use mercado_core::domain::{
    DomainError, NewUser, UserChanges, UserId, UserRecord, required_text,
};
use tracing::info;

use super::error::ApiError;
use super::state::AppState;

const NOT_FOUND: &str = "Usuario no encontrado";

/// 创建用户 API 路由。
pub fn create_user_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/usuarios", get(list_users).post(create_user))
        .route(
            "/usuarios/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn new_user(request: CreateUserRequest) -> Result<NewUser, DomainError> {
    Ok(NewUser {
        nombre: required_text("nombre", request.nombre)?,
        apellido: required_text("apellido", request.apellido)?,
        correo: required_text("correo", request.correo)?,
        contrasena: required_text("contrasena", request.contrasena)?,
        contacto: required_text("contacto", request.contacto)?,
    })
}

fn user_changes(request: UpdateUserRequest) -> Result<UserChanges, DomainError> {
    Ok(UserChanges {
        nombre: required_text("nombre", request.nombre)?,
        apellido: required_text("apellido", request.apellido)?,
        correo: required_text("correo", request.correo)?,
        contacto: required_text("contacto", request.contacto)?,
    })
}

/// 去掉密码后的公开视图。
fn user_response(record: UserRecord) -> UserResponse {
    let UserRecord { id, user } = record;
    UserResponse {
        id: id.into_inner(),
        nombre: user.nombre,
        apellido: user.apellido,
        correo: user.correo,
        contacto: user.contacto,
    }
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(request) = payload?;
    let user = new_user(request)?;

    let record = state
        .users
        .create(user)
        .await
        .map_err(ApiError::store("Error creando usuario"))?;

    info!(id = %record.id, "user created");
    Ok((StatusCode::CREATED, Json(user_response(record))))
}

async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state
        .users
        .list()
        .await
        .map_err(ApiError::store("Error obteniendo usuarios"))?
        .ok_or_else(|| ApiError::not_found("No hay usuarios disponibles"))?;

    Ok(Json(users.into_iter().map(user_response).collect()))
}

/// 按 ID 直接查找用户。
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let record = state
        .users
        .find_by_id(&UserId::from(id.as_str()))
        .await
        .map_err(ApiError::store("Error obteniendo datos del usuario"))?
        .ok_or_else(|| ApiError::not_found(format!("Usuario con ID {id} no encontrado")))?;

    Ok(Json(user_response(record)))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(request) = payload?;
    let changes = user_changes(request)?;

    let record = state
        .users
        .update(&UserId::from(id), changes)
        .await
        .map_err(ApiError::store("Error actualizando usuario"))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(Json(user_response(record)))
}

/// 删除用户。其商品、会话和消息不会级联删除。
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = UserId::from(id);
    let deleted = state
        .users
        .delete(&id)
        .await
        .map_err(ApiError::store("Error eliminando usuario"))?;

    if !deleted {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    info!(%id, "user deleted");
    Ok(Json(MessageResponse::new("Usuario eliminado correctamente")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_contact_is_missing() {
        let err = user_changes(UpdateUserRequest {
            nombre: Some("Ana".to_string()),
            apellido: Some("Pérez".to_string()),
            correo: Some("ana@example.com".to_string()),
            contacto: Some(String::new()),
        })
        .expect_err("blank contact is rejected");

        assert_eq!(err, DomainError::MissingField("contacto"));
    }

    #[test]
    fn response_drops_password() {
        let record = UserRecord {
            id: UserId::from("u1"),
            user: NewUser {
                nombre: "Ana".to_string(),
                apellido: "Pérez".to_string(),
                correo: "ana@example.com".to_string(),
                contrasena: "secreta".to_string(),
                contacto: "555".to_string(),
            }
            .register(),
        };

        let json = serde_json::to_value(user_response(record)).expect("serialize user");
        assert_eq!(json["id"], "u1");
        assert!(json.get("contrasena").is_none());
    }
}
