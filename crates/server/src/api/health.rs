use std::sync::Arc;

use axum::{Json, Router, routing::get};
use mercado_api_types::HealthCheckResponse;

use super::state::AppState;

pub fn create_health_router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}
