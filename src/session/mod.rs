//! Session Store.
//!
//! Holds the bearer token and user of the current session. The in-memory copy is what
//! every outbound request reads; a [`SessionPersistence`] backend keeps a durable copy so
//! the session survives a restart.

mod storage;

pub use storage::*;

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::User;

/// Snapshot of the authentication state.
///
/// A user is only ever held alongside a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, user: Option<User>) -> Self {
        Self {
            token: Some(token.into()),
            user,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Drop a user record that has no token next to it.
    fn normalized(self) -> Self {
        match self.token {
            Some(_) => self,
            None => Self::empty(),
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    session: Session,
    version: u64,
}

/// Process-wide owner of the [`Session`].
///
/// Mutated only through [`SessionStore::set_auth`] and [`SessionStore::clear`]; neither
/// fails, and both are idempotent. Every effective change bumps [`SessionStore::version`].
pub struct SessionStore {
    state: RwLock<SessionState>,
    persistence: Arc<dyn SessionPersistence>,
    persist_lock: Mutex<()>,
}

impl SessionStore {
    /// Create an empty store backed by `persistence`, without reading it.
    pub fn new(persistence: Arc<dyn SessionPersistence>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            persistence,
            persist_lock: Mutex::new(()),
        }
    }

    /// Create a store initialised from whatever `persistence` holds.
    pub async fn restore(persistence: Arc<dyn SessionPersistence>) -> Self {
        let store = Self::new(persistence);
        match store.persistence.load().await {
            Ok(Some(session)) => {
                let session = session.normalized();
                if session.is_authenticated() {
                    tracing::debug!("Restored persisted session");
                }
                let mut state = store.write_state();
                state.session = session;
                state.version = 1;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Ignoring unreadable persisted session: {}", e),
        }
        store
    }

    /// Read-only snapshot of the current session.
    pub fn current(&self) -> Session {
        self.read_state().session.clone()
    }

    /// Token to attach to a request dispatched now.
    pub fn token(&self) -> Option<String> {
        self.read_state().session.token.clone()
    }

    /// Monotonic counter of effective session changes.
    pub fn version(&self) -> u64 {
        self.read_state().version
    }

    /// Replace the session wholesale and persist it.
    pub async fn set_auth(&self, token: impl Into<String>, user: Option<User>) {
        let next = Session::authenticated(token, user);
        if self.replace(next) {
            tracing::debug!("Session updated");
        }
        self.persist_current().await;
    }

    /// Remove the session from memory and from durable storage.
    pub async fn clear(&self) {
        if self.replace(Session::empty()) {
            tracing::debug!("Session cleared");
        }
        self.persist_current().await;
    }

    /// Swap the in-memory session; returns whether anything changed.
    fn replace(&self, next: Session) -> bool {
        let mut state = self.write_state();
        if state.session == next {
            return false;
        }
        state.session = next;
        state.version += 1;
        true
    }

    /// Write the in-memory session to durable storage.
    ///
    /// Writes are serialized and always take the latest snapshot, so the persisted copy
    /// ends up matching memory even when set and clear race.
    async fn persist_current(&self) {
        let _guard = self.persist_lock.lock().await;
        let snapshot = self.current();
        let result = if snapshot.is_authenticated() {
            self.persistence.save(&snapshot).await
        } else {
            self.persistence.clear().await
        };
        if let Err(e) = result {
            tracing::warn!("Failed to persist session: {}", e);
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
