use crate::app_context::AppContext;
use crate::sessions::responses::{SessionErrorCode, SessionResponse};
use crate::storage::interface::ISessionStorage;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Json;

/// Id of a live session taken from the `:session_id` path segment.
pub struct ExistingSession {
    pub session_id: String,
}

#[async_trait]
impl<SS> FromRequestParts<AppContext<SS>> for ExistingSession
where
    SS: ISessionStorage,
{
    type Rejection = (StatusCode, Json<SessionResponse<()>>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext<SS>,
    ) -> Result<Self, Self::Rejection> {
        let not_found = || {
            (
                StatusCode::NOT_FOUND,
                Json(SessionResponse::failed(SessionErrorCode::SessionNotFound)),
            )
        };
        let Path(session_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found())?;
        if !state.sessions.exists(&session_id).await {
            return Err(not_found());
        }
        Ok(ExistingSession { session_id })
    }
}
