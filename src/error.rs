use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Everything an announcement operation can fail with.
///
/// All variants except `Store` are surfaced to the caller as-is. `Store` wraps
/// failures of the backing store or credential lookup and is reported as an
/// opaque internal error.
#[derive(Debug, thiserror::Error)]
pub enum AnnouncementError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid announcement ID")]
    InvalidId,

    #[error("Announcement not found")]
    NotFound,

    #[error("Invalid {field} format. Use YYYY-MM-DD")]
    InvalidDateFormat { field: &'static str },

    #[error("Start date cannot be after expiration date")]
    InvalidDateRange,

    #[error("Title is required")]
    MissingTitle,

    /// Request body missing or not the expected JSON shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Failed to update announcement")]
    UpdateFailed,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type AnnouncementResult<T> = Result<T, AnnouncementError>;

impl AnnouncementError {
    pub fn status(&self) -> StatusCode {
        match self {
            AnnouncementError::Unauthenticated | AnnouncementError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AnnouncementError::InvalidId
            | AnnouncementError::InvalidDateFormat { .. }
            | AnnouncementError::InvalidDateRange
            | AnnouncementError::MissingTitle
            | AnnouncementError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AnnouncementError::NotFound => StatusCode::NOT_FOUND,
            AnnouncementError::UpdateFailed | AnnouncementError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code, also used as the metrics outcome label.
    pub fn code(&self) -> &'static str {
        match self {
            AnnouncementError::Unauthenticated => "UNAUTHENTICATED",
            AnnouncementError::InvalidCredentials => "INVALID_CREDENTIALS",
            AnnouncementError::InvalidId => "INVALID_ID",
            AnnouncementError::NotFound => "NOT_FOUND",
            AnnouncementError::InvalidDateFormat { .. } => "INVALID_DATE_FORMAT",
            AnnouncementError::InvalidDateRange => "INVALID_DATE_RANGE",
            AnnouncementError::MissingTitle => "MISSING_TITLE",
            AnnouncementError::InvalidBody(_) => "INVALID_BODY",
            AnnouncementError::UpdateFailed => "UPDATE_FAILED",
            AnnouncementError::Store(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AnnouncementError {
    fn into_response(self) -> Response {
        let message = match &self {
            AnnouncementError::Store(err) => {
                tracing::error!(error = %err, "Announcement store failure");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": message,
            "code": self.code(),
        });

        (self.status(), Json(body)).into_response()
    }
}
