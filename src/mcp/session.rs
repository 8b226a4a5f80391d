//! In-memory session store.
//!
//! Sessions exist only to record whether the initialisation handshake
//! happened for a given token; they carry no authorisation semantics and
//! never expire. Lifetime is bounded by the process or an explicit
//! `terminate`.
//!
//! # Concurrency
//!
//! Individual map operations are atomic behind the mutex, but the window
//! across a provider call is deliberately left open: a `terminate` can
//! race an in-flight `callTool` for the same token, and the loser simply
//! operates on a record that no longer exists. The design does not close
//! this window.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

/// A server-side session record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    /// Whether the `initialize` handshake has occurred.
    pub initialized: bool,
}

/// Mapping from opaque token to session record.
///
/// Invariant: a token, once issued, maps to at most one record at a time.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        // A poisoned map is still structurally valid; keep serving.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolves a caller-supplied token to a session, creating a fresh
    /// uninitialised record under a generated token when the supplied one
    /// is absent or unknown. Returns the token now owning a record.
    pub fn resolve(&self, token: Option<&str>) -> String {
        let mut sessions = self.lock();

        if let Some(token) = token {
            if sessions.contains_key(token) {
                return token.to_string();
            }
        }

        let token = Uuid::new_v4().to_string();
        sessions.insert(token.clone(), Session::default());
        token
    }

    /// Marks the session for `token` as initialised.
    pub fn mark_initialized(&self, token: &str) {
        if let Some(session) = self.lock().get_mut(token) {
            session.initialized = true;
        }
    }

    /// Removes the session record for `token`. Removing an unknown token
    /// is a no-op, so calling `terminate` twice never errors.
    pub fn remove(&self, token: &str) {
        self.lock().remove(token);
    }

    /// Returns whether a record exists for `token`.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.lock().contains_key(token)
    }

    /// Returns the session record for `token`, if any.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<Session> {
        self.lock().get(token).copied()
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_without_token_creates_session() {
        let store = SessionStore::new();
        let token = store.resolve(None);

        assert!(store.contains(&token));
        assert_eq!(store.get(&token), Some(Session { initialized: false }));
    }

    #[test]
    fn resolve_unknown_token_issues_fresh_one() {
        let store = SessionStore::new();
        let token = store.resolve(Some("made-up-token"));

        // The guessed token is not honoured; a new one is generated.
        assert_ne!(token, "made-up-token");
        assert!(!store.contains("made-up-token"));
        assert!(store.contains(&token));
    }

    #[test]
    fn resolve_known_token_reuses_record() {
        let store = SessionStore::new();
        let token = store.resolve(None);
        store.mark_initialized(&token);

        let resolved = store.resolve(Some(&token));
        assert_eq!(resolved, token);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&token), Some(Session { initialized: true }));
    }

    #[test]
    fn tokens_are_unique() {
        let store = SessionStore::new();
        let a = store.resolve(None);
        let b = store.resolve(None);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn mark_initialized_flips_flag() {
        let store = SessionStore::new();
        let token = store.resolve(None);

        store.mark_initialized(&token);
        assert_eq!(store.get(&token), Some(Session { initialized: true }));
    }

    #[test]
    fn remove_is_idempotent() {
        let store = SessionStore::new();
        let token = store.resolve(None);

        store.remove(&token);
        assert!(!store.contains(&token));

        // Second removal must not panic or error.
        store.remove(&token);
        assert!(store.is_empty());
    }
}
