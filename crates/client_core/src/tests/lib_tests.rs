use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::domain::{GuessOutcome, Screen};
use std::{collections::HashMap, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

type Sessions = Arc<Mutex<HashMap<String, RoundController>>>;

async fn handle_create(State(sessions): State<Sessions>) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = SessionId::new();
    let game = RoundController::seeded(WordBank::builtin(), 5);
    let view = game.view();
    sessions.lock().await.insert(session_id.to_string(), game);
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id, view }),
    )
}

async fn handle_categories() -> Json<Vec<CategorySummary>> {
    Json(WordBank::builtin().list_categories())
}

async fn handle_view(
    State(sessions): State<Sessions>,
    Path(id): Path<String>,
) -> std::result::Result<Json<RoundView>, (StatusCode, Json<ApiError>)> {
    sessions
        .lock()
        .await
        .get(&id)
        .map(|game| Json(game.view()))
        .ok_or_else(not_found)
}

async fn handle_delete(State(sessions): State<Sessions>, Path(id): Path<String>) -> StatusCode {
    match sessions.lock().await.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn handle_action(
    State(sessions): State<Sessions>,
    Path(id): Path<String>,
    Json(action): Json<GameAction>,
) -> std::result::Result<Json<RoundView>, (StatusCode, Json<ApiError>)> {
    let mut sessions = sessions.lock().await;
    let game = sessions.get_mut(&id).ok_or_else(not_found)?;
    game.apply(action)
        .map(Json)
        .map_err(|error| (StatusCode::BAD_REQUEST, Json(ApiError::from(error))))
}

fn not_found() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::SessionNotFound, "session not found")),
    )
}

async fn spawn_game_server(prefix: &str) -> (String, Sessions) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let sessions: Sessions = Arc::new(Mutex::new(HashMap::new()));
    let routes = Router::new()
        .route("/categories", get(handle_categories))
        .route("/sessions", post(handle_create))
        .route("/sessions/:id", get(handle_view).delete(handle_delete))
        .route("/sessions/:id/actions", post(handle_action))
        .with_state(sessions.clone());
    let app = if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(prefix, routes)
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}{prefix}"), sessions)
}

#[tokio::test]
async fn local_game_plays_a_round() {
    let mut client = LocalGame::new(WordBank::builtin(), Some(3));
    assert_eq!(client.categories().await.expect("categories").len(), 9);
    assert_eq!(client.view().await.expect("view").screen, Screen::CategorySelection);

    let view = client
        .dispatch(GameAction::StartGame {
            category: "Fruits".into(),
        })
        .await
        .expect("start");
    assert!(view.is_playing());

    let view = client
        .dispatch(GameAction::SubmitGuess {
            guess: "zzz".into(),
        })
        .await
        .expect("guess");
    assert!(view.reveal_answer);
}

#[tokio::test]
async fn local_game_surfaces_unknown_category() {
    let mut client = LocalGame::new(WordBank::builtin(), None);
    let err = client
        .dispatch(GameAction::StartGame {
            category: "Planets".into(),
        })
        .await
        .expect_err("unknown");
    assert!(err.is_unknown_category());
}

#[tokio::test]
async fn remote_game_round_trip() {
    let (server_url, sessions) = spawn_game_server("").await;
    let mut client = RemoteGame::connect(&server_url).await.expect("connect");
    assert!(sessions
        .lock()
        .await
        .contains_key(&client.session_id().to_string()));

    let categories = client.categories().await.expect("categories");
    assert_eq!(categories[1].name, "Animals");

    let view = client
        .dispatch(GameAction::StartGame {
            category: "Animals".into(),
        })
        .await
        .expect("start");
    assert_eq!(view.category.as_deref(), Some("Animals"));

    let view = client
        .dispatch(GameAction::SubmitGuess {
            guess: "dragon".into(),
        })
        .await
        .expect("guess");
    let answer = view.original_word.expect("revealed");

    let view = client
        .dispatch(GameAction::SubmitGuess { guess: answer })
        .await
        .expect("guess");
    assert_eq!(view.outcome, Some(GuessOutcome::Correct));
    assert_eq!(client.view().await.expect("view"), view);

    client.close().await.expect("close");
    assert!(sessions.lock().await.is_empty());
}

#[tokio::test]
async fn remote_errors_decode_api_body() {
    let (server_url, _sessions) = spawn_game_server("").await;
    let mut client = RemoteGame::connect(&server_url).await.expect("connect");
    let err = client
        .dispatch(GameAction::StartGame {
            category: "Planets".into(),
        })
        .await
        .expect_err("unknown");
    assert!(err.is_unknown_category());
    match err {
        ClientError::Api(api) => assert_eq!(api.message, "unknown category: Planets"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn remote_game_keeps_path_prefix() {
    let (server_url, _sessions) = spawn_game_server("/scramble").await;
    let mut client = RemoteGame::connect(&server_url).await.expect("connect");
    let view = client.view().await.expect("view");
    assert_eq!(view.screen, Screen::CategorySelection);
}

#[test]
fn base_url_gets_trailing_slash() {
    let url = normalize_base_url("http://localhost:8080/game").expect("url");
    assert_eq!(url.as_str(), "http://localhost:8080/game/");
    assert_eq!(
        url.join("sessions").expect("join").as_str(),
        "http://localhost:8080/game/sessions"
    );
    assert!(matches!(
        normalize_base_url("not a url"),
        Err(ClientError::Url(_))
    ));
}
