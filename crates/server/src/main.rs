use std::{net::SocketAddr, sync::Arc, time::Duration as StdDuration};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use game::WordBank;
use shared::{
    domain::{CategorySummary, RoundView},
    error::{ApiError, ErrorCode},
    protocol::{CreateSessionResponse, GameAction},
};
use tokio::task::JoinHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;
mod sessions;

use api::{
    apply_action, close_session, create_session, list_categories, session_view, status_for,
    ApiContext,
};
use app_state::AppState;
use config::load_settings;
use sessions::SessionStore;

const MAX_BODY_BYTES: usize = 16 * 1024;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let sessions = SessionStore::new(
        WordBank::builtin(),
        settings.max_sessions,
        seconds(settings.session_idle_ttl_seconds),
    );
    let _sweeper = spawn_session_sweeper(
        sessions.clone(),
        StdDuration::from_secs(settings.sweep_interval_seconds.max(1)),
    );

    let state = AppState {
        api: ApiContext {
            sessions: sessions.clone(),
        },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(
        %addr,
        max_sessions = settings.max_sessions,
        idle_ttl_seconds = settings.session_idle_ttl_seconds,
        "server listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(open_sessions = sessions.len().await, "server stopped");
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/categories", get(http_list_categories))
        .route("/sessions", post(http_create_session))
        .route(
            "/sessions/:session_id",
            get(http_session_view).delete(http_close_session),
        )
        .route("/sessions/:session_id/actions", post(http_apply_action))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

fn seconds(value: u64) -> Duration {
    Duration::try_seconds(i64::try_from(value).unwrap_or(i64::MAX)).unwrap_or(Duration::MAX)
}

fn spawn_session_sweeper(sessions: SessionStore, every: StdDuration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            sessions.evict_idle(Utc::now()).await;
        }
    })
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn reject(error: ApiError) -> (StatusCode, Json<ApiError>) {
    (status_for(error.code), Json(error))
}

/// Malformed action bodies answer with an `ApiError`; an oversized body keeps
/// its 413.
fn reject_body(rejection: JsonRejection) -> (StatusCode, Json<ApiError>) {
    let error = ApiError::new(ErrorCode::Validation, rejection.body_text());
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => (StatusCode::PAYLOAD_TOO_LARGE, Json(error)),
        _ => reject(error),
    }
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<CategorySummary>> {
    Json(list_categories(&state.api))
}

async fn http_create_session(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<CreateSessionResponse>)> {
    let created = create_session(&state.api).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn http_session_view(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<RoundView>> {
    session_view(&state.api, &session_id)
        .await
        .map(Json)
        .map_err(reject)
}

async fn http_apply_action(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    action: Result<Json<GameAction>, JsonRejection>,
) -> ApiResult<Json<RoundView>> {
    let Json(action) = action.map_err(reject_body)?;
    apply_action(&state.api, &session_id, action)
        .await
        .map(Json)
        .map_err(reject)
}

async fn http_close_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<StatusCode> {
    close_session(&state.api, &session_id)
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
