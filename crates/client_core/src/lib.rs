//! Front-end side of the game: one trait for "read state, dispatch action" and
//! two backends, an in-process controller and a session on a remote server.

use async_trait::async_trait;
use game::{RoundController, WordBank};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{CategorySummary, RoundView, SessionId},
    error::{ApiError, ErrorCode, GameError},
    protocol::{CreateSessionResponse, GameAction},
};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("server rejected request: {0}")]
    Api(ApiError),
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid server url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    pub fn is_unknown_category(&self) -> bool {
        match self {
            Self::Game(GameError::UnknownCategory(_)) => true,
            Self::Api(error) => error.code == ErrorCode::UnknownCategory,
            _ => false,
        }
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[async_trait]
pub trait GameClient: Send {
    async fn categories(&mut self) -> Result<Vec<CategorySummary>>;
    async fn view(&mut self) -> Result<RoundView>;
    async fn dispatch(&mut self, action: GameAction) -> Result<RoundView>;
}

/// Plays against a controller owned by this process.
pub struct LocalGame {
    game: RoundController,
}

impl LocalGame {
    pub fn new(bank: &'static WordBank, seed: Option<u64>) -> Self {
        let game = match seed {
            Some(seed) => RoundController::seeded(bank, seed),
            None => RoundController::new(bank),
        };
        Self { game }
    }
}

#[async_trait]
impl GameClient for LocalGame {
    async fn categories(&mut self) -> Result<Vec<CategorySummary>> {
        Ok(self.game.bank().list_categories())
    }

    async fn view(&mut self) -> Result<RoundView> {
        Ok(self.game.view())
    }

    async fn dispatch(&mut self, action: GameAction) -> Result<RoundView> {
        Ok(self.game.apply(action)?)
    }
}

/// Plays inside a session hosted by the game server.
pub struct RemoteGame {
    http: Client,
    base_url: Url,
    session_id: SessionId,
}

impl RemoteGame {
    pub async fn connect(server_url: &str) -> Result<Self> {
        let base_url = normalize_base_url(server_url)?;
        let http = Client::new();
        let response = http
            .post(base_url.join("sessions")?)
            .send()
            .await?;
        let created: CreateSessionResponse = decode(response).await?;
        info!(session_id = %created.session_id, %base_url, "joined game server");
        Ok(Self {
            http,
            base_url,
            session_id: created.session_id,
        })
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Ends the session on the server.
    pub async fn close(self) -> Result<()> {
        let response = self
            .http
            .delete(self.session_url("")?)
            .send()
            .await?;
        if response.status().is_success() {
            debug!(session_id = %self.session_id, "session closed");
            Ok(())
        } else {
            Err(ClientError::Api(api_error(response).await))
        }
    }

    fn session_url(&self, suffix: &str) -> Result<Url> {
        Ok(self
            .base_url
            .join(&format!("sessions/{}{suffix}", self.session_id))?)
    }
}

#[async_trait]
impl GameClient for RemoteGame {
    async fn categories(&mut self) -> Result<Vec<CategorySummary>> {
        let response = self
            .http
            .get(self.base_url.join("categories")?)
            .send()
            .await?;
        decode(response).await
    }

    async fn view(&mut self) -> Result<RoundView> {
        let response = self.http.get(self.session_url("")?).send().await?;
        decode(response).await
    }

    async fn dispatch(&mut self, action: GameAction) -> Result<RoundView> {
        let response = self
            .http
            .post(self.session_url("/actions")?)
            .json(&action)
            .send()
            .await?;
        decode(response).await
    }
}

/// Parses `server_url` and guarantees a trailing slash so relative joins
/// append instead of replacing the last path segment.
fn normalize_base_url(server_url: &str) -> Result<Url> {
    let mut url = Url::parse(server_url.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(ClientError::Api(api_error(response).await))
    }
}

async fn api_error(response: Response) -> ApiError {
    let status = response.status();
    match response.json::<ApiError>().await {
        Ok(error) => error,
        Err(_) => ApiError::new(ErrorCode::Internal, format!("unexpected status {status}")),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
