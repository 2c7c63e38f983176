//! API 路由模块。
//!
//! 对外暴露商品、用户、会话和消息的 REST 接口。

pub mod chats;
pub mod error;
pub mod health;
pub mod messages;
pub mod products;
pub mod state;
pub mod users;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use chats::create_chat_router;
pub use error::ApiError;
pub use health::create_health_router;
pub use messages::create_message_router;
pub use products::create_product_router;
pub use state::AppState;
pub use users::create_user_router;

/// 组装全部路由。`cors_origins` 为空时允许任意来源。
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .merge(create_health_router())
        .merge(create_product_router())
        .merge(create_user_router())
        .merge(create_chat_router())
        .merge(create_message_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(Arc::new(state))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%origin, error = %err, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
