use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AnnouncementError, AnnouncementResult},
    middleware::caller::Caller,
    models::announcement::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest},
    services::metrics,
    AppState,
};

/// GET /announcements: public, started and unexpired announcements.
pub async fn list_active(
    State(state): State<AppState>,
) -> AnnouncementResult<Json<Vec<Announcement>>> {
    let result = state.announcements.list_active().await;
    metrics::record("list_active", &result);
    result.map(Json)
}

/// GET /announcements/all?username=: every announcement, teachers only.
pub async fn list_all(
    State(state): State<AppState>,
    caller: Caller,
) -> AnnouncementResult<Json<Vec<Announcement>>> {
    let result = state.announcements.list_all(caller.as_deref()).await;
    metrics::record("list_all", &result);
    result.map(Json)
}

/// Body rejections are reported only once the caller is known, so an anonymous
/// request always gets `Unauthenticated` whatever it sent.
async fn reject_body<T>(
    state: &AppState,
    caller: &Caller,
    rejection: JsonRejection,
) -> AnnouncementResult<T> {
    state.announcements.authorize(caller.as_deref()).await?;
    Err(AnnouncementError::InvalidBody(rejection.body_text()))
}

/// POST /announcements?username=
pub async fn create_announcement(
    State(state): State<AppState>,
    caller: Caller,
    body: Result<Json<CreateAnnouncementRequest>, JsonRejection>,
) -> AnnouncementResult<(StatusCode, Json<Announcement>)> {
    let result = match body {
        Ok(Json(body)) => state.announcements.create(caller.as_deref(), body).await,
        Err(rejection) => reject_body(&state, &caller, rejection).await,
    };
    metrics::record("create", &result);
    result.map(|a| (StatusCode::CREATED, Json(a)))
}

/// PUT /announcements/{id}?username=
///
/// Every field is optional, so a request without a JSON body is an empty update.
pub async fn update_announcement(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    body: Result<Json<UpdateAnnouncementRequest>, JsonRejection>,
) -> AnnouncementResult<Json<Announcement>> {
    let body = match body {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(UpdateAnnouncementRequest::default()),
        Err(rejection) => Err(rejection),
    };
    let result = match body {
        Ok(body) => state.announcements.update(caller.as_deref(), &id, body).await,
        Err(rejection) => reject_body(&state, &caller, rejection).await,
    };
    metrics::record("update", &result);
    result.map(Json)
}

/// DELETE /announcements/{id}?username=
pub async fn delete_announcement(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AnnouncementResult<Json<Value>> {
    let result = state.announcements.delete(caller.as_deref(), &id).await;
    metrics::record("delete", &result);
    result.map(|_| Json(json!({ "message": "Announcement deleted successfully" })))
}
