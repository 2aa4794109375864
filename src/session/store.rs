use std::collections::HashMap;

use tracing::debug;

use super::state::Session;

/// Owns one [`Session`] per connected user.
///
/// Sessions are created on first contact and dropped on [`SessionStore::end`].
/// Nothing is shared between sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the session for `key`, creating an empty one if needed
    pub fn get_or_init(&mut self, key: &str) -> &mut Session {
        self.sessions.entry(key.to_string()).or_insert_with(|| {
            debug!("Starting session '{}'", key);
            Session::new()
        })
    }

    pub fn get(&self, key: &str) -> Option<&Session> {
        self.sessions.get(key)
    }

    /// Discard the session for `key`, returning it if it existed
    pub fn end(&mut self, key: &str) -> Option<Session> {
        let session = self.sessions.remove(key);
        if session.is_some() {
            debug!("Ended session '{}'", key);
        }
        session
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
