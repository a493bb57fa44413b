use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{config::StoreBackend, AppState};

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let backend = match state.config.store_backend {
        StoreBackend::Postgres => "postgres",
        StoreBackend::Memory => "memory",
    };
    match state.announcements.ping_store().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "store": "connected", "backend": backend })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "error", "store": e.to_string(), "backend": backend })),
        ),
    }
}
