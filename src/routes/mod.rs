pub mod announcements;
pub mod health;
pub mod metrics;

use axum::{
    routing::{get, put},
    Router,
};

use crate::AppState;

/// All routes, without the transport layers (CORS, tracing) added in `main`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        .route(
            "/announcements",
            get(announcements::list_active).post(announcements::create_announcement),
        )
        .route("/announcements/", get(announcements::list_active))
        .route("/announcements/all", get(announcements::list_all))
        .route(
            "/announcements/{id}",
            put(announcements::update_announcement).delete(announcements::delete_announcement),
        )
        .with_state(state)
}
