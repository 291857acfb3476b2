use axum::http::StatusCode;
use chrono::Utc;
use shared::{
    domain::{CategorySummary, RoundView, SessionId},
    error::{ApiError, ErrorCode},
    protocol::{CreateSessionResponse, GameAction},
};
use tracing::{debug, info, warn};

use crate::sessions::{SessionError, SessionStore};

#[derive(Clone)]
pub struct ApiContext {
    pub sessions: SessionStore,
}

pub fn list_categories(ctx: &ApiContext) -> Vec<CategorySummary> {
    ctx.sessions.bank().list_categories()
}

pub async fn create_session(ctx: &ApiContext) -> Result<CreateSessionResponse, ApiError> {
    let (session_id, view) = ctx
        .sessions
        .create(Utc::now())
        .await
        .map_err(session_error)?;
    info!(%session_id, "session created");
    Ok(CreateSessionResponse { session_id, view })
}

pub async fn session_view(ctx: &ApiContext, raw_session_id: &str) -> Result<RoundView, ApiError> {
    let session_id = parse_session_id(raw_session_id)?;
    ctx.sessions
        .with_session(session_id, Utc::now(), |game| game.view())
        .await
        .map_err(session_error)
}

pub async fn apply_action(
    ctx: &ApiContext,
    raw_session_id: &str,
    action: GameAction,
) -> Result<RoundView, ApiError> {
    let session_id = parse_session_id(raw_session_id)?;
    debug!(%session_id, ?action, "applying action");
    ctx.sessions
        .with_session(session_id, Utc::now(), |game| game.apply(action))
        .await
        .map_err(session_error)?
        .map_err(|error| {
            warn!(%session_id, %error, "action rejected");
            ApiError::from(error)
        })
}

pub async fn close_session(ctx: &ApiContext, raw_session_id: &str) -> Result<(), ApiError> {
    let session_id = parse_session_id(raw_session_id)?;
    ctx.sessions
        .remove(session_id)
        .await
        .map_err(session_error)?;
    info!(%session_id, "session closed");
    Ok(())
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::UnknownCategory | ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::SessionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Capacity => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::new(ErrorCode::Validation, "invalid session id"))
}

fn session_error(error: SessionError) -> ApiError {
    match error {
        SessionError::NotFound => ApiError::new(ErrorCode::SessionNotFound, error.to_string()),
        SessionError::Capacity { .. } => {
            warn!(%error, "refusing new session");
            ApiError::new(ErrorCode::Capacity, error.to_string())
        }
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
