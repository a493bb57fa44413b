use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use announcements_api::config::{Config, StoreBackend};
use announcements_api::db::memory::{MemoryAnnouncementStore, StaticCredentialGate};
use announcements_api::ports::FixedClock;
use announcements_api::routes;
use announcements_api::services::announcements::AnnouncementService;
use announcements_api::AppState;

pub const TEACHER: &str = "ms_jones";

pub fn test_config() -> Config {
    Config {
        store_backend: StoreBackend::Memory,
        database_url: None,
        host: "127.0.0.1".to_string(),
        port: 0,
        app_base_url: "http://localhost:5173".to_string(),
        known_teachers: vec![TEACHER.to_string()],
        metrics_interval_secs: 300,
    }
}

/// Router over a fresh in-memory store whose clock is frozen on `today`.
pub fn build_test_app(today: &str) -> Router {
    let config = test_config();
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d").unwrap();
    let service = AnnouncementService::new(
        Arc::new(MemoryAnnouncementStore::default()),
        Arc::new(StaticCredentialGate::new(config.known_teachers.clone())),
        Arc::new(FixedClock::on(today)),
    );
    routes::router(AppState {
        announcements: Arc::new(service),
        config: Arc::new(config),
    })
}

/// Send one request and return the status with the parsed JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
