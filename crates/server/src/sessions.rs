use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use game::{RoundController, WordBank};
use shared::domain::{RoundView, SessionId};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,
    #[error("session limit of {max} reached")]
    Capacity { max: usize },
}

struct SessionEntry {
    game: RoundController,
    last_seen: DateTime<Utc>,
}

/// One round controller per session, keyed by an opaque id.
///
/// Sessions idle for longer than `idle_ttl` are treated as gone even before the
/// sweeper removes them.
#[derive(Clone)]
pub struct SessionStore {
    bank: &'static WordBank,
    sessions: Arc<Mutex<HashMap<SessionId, SessionEntry>>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(bank: &'static WordBank, max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            bank,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions,
            idle_ttl,
        }
    }

    pub fn bank(&self) -> &'static WordBank {
        self.bank
    }

    pub async fn create(&self, now: DateTime<Utc>) -> Result<(SessionId, RoundView), SessionError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.len() >= self.max_sessions {
            sessions.retain(|_, entry| now - entry.last_seen <= self.idle_ttl);
        }
        if sessions.len() >= self.max_sessions {
            return Err(SessionError::Capacity {
                max: self.max_sessions,
            });
        }
        let session_id = SessionId::new();
        let game = RoundController::new(self.bank);
        let view = game.view();
        sessions.insert(
            session_id,
            SessionEntry {
                game,
                last_seen: now,
            },
        );
        Ok((session_id, view))
    }

    /// Runs `f` against the session's controller and refreshes its idle timer.
    pub async fn with_session<T>(
        &self,
        session_id: SessionId,
        now: DateTime<Utc>,
        f: impl FnOnce(&mut RoundController) -> T,
    ) -> Result<T, SessionError> {
        let mut sessions = self.sessions.lock().await;
        let expired = match sessions.get(&session_id) {
            None => return Err(SessionError::NotFound),
            Some(entry) => now - entry.last_seen > self.idle_ttl,
        };
        if expired {
            sessions.remove(&session_id);
            debug!(%session_id, "session expired on access");
            return Err(SessionError::NotFound);
        }
        let entry = sessions
            .get_mut(&session_id)
            .ok_or(SessionError::NotFound)?;
        entry.last_seen = now;
        Ok(f(&mut entry.game))
    }

    pub async fn remove(&self, session_id: SessionId) -> Result<(), SessionError> {
        self.sessions
            .lock()
            .await
            .remove(&session_id)
            .map(|_| ())
            .ok_or(SessionError::NotFound)
    }

    /// Drops every session idle for longer than the TTL; returns how many went.
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen <= self.idle_ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "evicted idle sessions");
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
