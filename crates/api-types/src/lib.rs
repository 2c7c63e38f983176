//! Shared request/response types used by API-facing crates.
//!
//! Request bodies keep every field optional: presence is checked by the server
//! so that any missing field yields the same validation error.

use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Confirmation body returned by delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateProductRequest {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<Number>,
    pub foto_url: Option<String>,
    pub usuario_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateProductRequest {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<Number>,
    pub foto_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_publicacion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub correo: Option<String>,
    pub contrasena: Option<String>,
    pub contacto: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequest {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub correo: Option<String>,
    pub contacto: Option<String>,
}

/// Public view of a user. The password never leaves the server.
///
/// Record views omit fields the stored record does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacto: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateChatRequest {
    pub producto_id: Option<String>,
    pub ofertante_id: Option<String>,
    pub interesado_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producto_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ofertante_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interesado_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateMessageRequest {
    pub chat_id: Option<String>,
    pub emisor_id: Option<String>,
    pub contenido: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecordResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emisor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contenido: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_envio: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_ok_payload() {
        let response = HealthCheckResponse::ok();
        assert_eq!(response.status, "ok");
    }

    #[test]
    fn error_response_uses_error_key() {
        let json = serde_json::to_value(ErrorResponse::new("Chat no encontrado"))
            .expect("serialize error response");

        assert_eq!(json, serde_json::json!({ "error": "Chat no encontrado" }));
    }

    #[test]
    fn missing_and_null_request_fields_deserialize_as_none() {
        let request: CreateProductRequest =
            serde_json::from_str(r#"{"nombre":"Mesa","precio":null}"#)
                .expect("partial body should deserialize");

        assert_eq!(request.nombre.as_deref(), Some("Mesa"));
        assert!(request.precio.is_none());
        assert!(request.usuario_id.is_none());
    }

    #[test]
    fn user_response_has_no_password_field() {
        let response = UserResponse {
            id: "u1".to_string(),
            nombre: Some("Ana".to_string()),
            apellido: Some("Pérez".to_string()),
            correo: Some("ana@example.com".to_string()),
            contacto: None,
        };

        let json = serde_json::to_value(response).expect("serialize user");
        assert!(json.get("contrasena").is_none());
        assert!(json.get("contacto").is_none());
    }
}
