//! API 错误类型及其 HTTP 映射。

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mercado_api_types::ErrorResponse;
use mercado_core::domain::DomainError;
use thiserror::Error;
use tracing::{debug, error};

/// 缺少必填字段时返回的固定消息。
pub const MISSING_FIELDS: &str = "Faltan campos requeridos";

/// 每个请求最多产生一个错误，客户端只会看到固定消息。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Faltan campos requeridos")]
    Validation,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// 记录存储层错误并替换为接口固定的 500 消息。
    pub fn store(message: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |err| {
            error!(error = ?err, "{message}");
            Self::Internal(message)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        debug!(error = %err, "rejecting request payload");
        ApiError::Validation
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        debug!(error = %err, "rejecting unreadable request body");
        ApiError::Validation
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.to_string()));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_uses_fixed_message() {
        let err = ApiError::from(DomainError::MissingField("precio"));

        assert_eq!(err, ApiError::Validation);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Faltan campos requeridos");
    }

    #[test]
    fn store_failure_hides_the_cause() {
        let err = ApiError::store("Error creando chat")(anyhow::anyhow!("connection refused"));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error creando chat");
    }

    #[test]
    fn not_found_keeps_entity_message() {
        let err = ApiError::not_found("Chat no encontrado");

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Chat no encontrado");
    }
}
