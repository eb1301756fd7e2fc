//! In-memory session store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_entity::session::{NewSession, Session, SessionStore};

/// Mutex-guarded map of sessions, keyed by token hash.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: &NewSession) -> AppResult<Session> {
        let mut sessions = self.sessions.lock().await;

        if sessions.contains_key(&session.token_hash) {
            return Err(AppError::conflict("Session token already exists"));
        }

        let stored = Session {
            id: Uuid::new_v4(),
            user_id: session.user_id,
            token_hash: session.token_hash.clone(),
            expires_at: session.expires_at,
            revoked: false,
            created_at: Utc::now(),
        };
        sessions.insert(stored.token_hash.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Session>> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(token_hash).cloned())
    }

    async fn revoke(&self, token_hash: &str) -> AppResult<bool> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(token_hash) {
            Some(session) if !session.revoked => {
                session.revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
