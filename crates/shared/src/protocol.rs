use serde::{Deserialize, Serialize};

use crate::domain::{RoundView, SessionId};

/// A single user action forwarded from a presentation layer into a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum GameAction {
    StartGame { category: String },
    NextWord,
    SubmitGuess { guess: String },
    Reset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: SessionId,
    pub view: RoundView,
}
