//! Tests for `AnnouncementError` → HTTP response mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

use announcements_api::error::AnnouncementError;

async fn error_to_response(err: AnnouncementError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn auth_errors_return_401() {
    let (status, json) = error_to_response(AnnouncementError::Unauthenticated).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Authentication required");

    let (status, json) = error_to_response(AnnouncementError::InvalidCredentials).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn date_errors_return_400_with_field_name() {
    let (status, json) =
        error_to_response(AnnouncementError::InvalidDateFormat { field: "start_date" }).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid start_date format. Use YYYY-MM-DD");

    let (status, json) = error_to_response(AnnouncementError::InvalidDateRange).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Start date cannot be after expiration date");
}

#[tokio::test]
async fn update_failed_returns_500() {
    let (status, json) = error_to_response(AnnouncementError::UpdateFailed).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "UPDATE_FAILED");
}

#[tokio::test]
async fn store_error_is_sanitized() {
    let err = AnnouncementError::Store(anyhow::anyhow!("connection refused to 10.0.0.3:5432"));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn invalid_body_returns_400() {
    let err = AnnouncementError::InvalidBody("missing field `message`".into());
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_BODY");
}
