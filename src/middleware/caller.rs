use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct CallerQuery {
    username: Option<String>,
}

/// Extractor for the `?username=` caller identifier.
///
/// Never rejects a missing identifier; the service decides whether the
/// operation needs one.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<String>);

impl Caller {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<CallerQuery>::try_from_uri(&parts.uri)
            .map_err(|_| (StatusCode::BAD_REQUEST, "Malformed query string"))?;
        Ok(Caller(query.username))
    }
}
