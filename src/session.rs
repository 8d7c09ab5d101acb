//! Authenticated session state.
//!
//! A [`Session`] pairs the server's auth token with the logged-in user
//! profile so role checks never need a network round trip. The store
//! persists the session as JSON under the app data directory and reloads
//! it on startup for a silent resume.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Role, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session file I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt session file: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Holds the current session, if any.
#[derive(Default)]
pub struct SessionStore {
    current: Option<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, session: Session) {
        debug!(user = %session.user.username, role = %session.user.role, "session started");
        self.current = Some(session);
    }

    pub fn end(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Persist the current session. A no-op when logged out.
    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        let Some(session) = &self.current else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a persisted session. A missing file means no prior login.
    pub fn load(path: &Path) -> Result<Option<Session>, SessionError> {
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        let session: Session = serde_json::from_str(&json)?;
        Ok(Some(session))
    }

    /// Remove the persisted session file on logout.
    pub fn clear_saved(path: &Path) -> Result<(), SessionError> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
