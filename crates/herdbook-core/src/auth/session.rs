use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Application name used for the state directory path
const APP_NAME: &str = "herdbook";

/// Session file name in the state directory
const SESSION_FILE: &str = "session.json";

/// Current token pair held by a session store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

/// The credential store the API client depends on.
///
/// The client only performs reads and single-field overwrites: it reads
/// the token pair before each send, writes a new access token after a
/// refresh, and clears everything when the session is unrecoverable.
/// Implementations must be safe to share across concurrent requests.
pub trait SessionStore: Send + Sync {
    fn tokens(&self) -> SessionTokens;

    /// Store a fresh token pair from a successful login.
    fn set_session(&self, access: String, refresh: String);

    /// Overwrite the access token after a refresh. The refresh token is
    /// not rotated by the server.
    fn set_access_token(&self, access: String);

    fn set_user(&self, user: User);

    fn user(&self) -> Option<User>;

    fn is_authenticated(&self) -> bool;

    /// Logout: drop tokens, user, and the authenticated flag.
    fn clear(&self);
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    access: Option<String>,
    refresh: Option<String>,
    is_authenticated: bool,
}

/// In-process session store. Exactly one instance should be live per
/// process; single-instance semantics are the caller's responsibility.
#[derive(Debug, Default)]
pub struct MemorySession {
    state: RwLock<SessionState>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn tokens(&self) -> SessionTokens {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        SessionTokens {
            access: state.access.clone(),
            refresh: state.refresh.clone(),
        }
    }

    fn set_session(&self, access: String, refresh: String) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.access = Some(access);
        state.refresh = Some(refresh);
        state.is_authenticated = true;
    }

    fn set_access_token(&self, access: String) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.access = Some(access);
    }

    fn set_user(&self, user: User) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.user = Some(user);
    }

    fn user(&self) -> Option<User> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.user.clone()
    }

    fn is_authenticated(&self) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.is_authenticated
    }

    fn clear(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = SessionState::default();
    }
}

/// On-disk session snapshot so a login survives process restarts.
///
/// Stored at `<data dir>/herdbook/session.json`. The access token may have
/// been silently refreshed during a run, so callers should snapshot the
/// store again after each command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    pub access: Option<String>,
    pub refresh: Option<String>,
    pub username: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl SessionFile {
    /// Snapshot the current store state for persistence.
    pub fn from_store(store: &dyn SessionStore, username: Option<String>) -> Self {
        let tokens = store.tokens();
        Self {
            access: tokens.access,
            refresh: tokens.refresh,
            username,
            saved_at: Utc::now(),
        }
    }

    /// Load a saved session from disk, if one exists.
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(&Self::session_path()?)
    }

    /// Copy the saved token pair into a live store. Marks the session
    /// authenticated only when both tokens are present.
    pub fn hydrate(&self, store: &dyn SessionStore) {
        if let (Some(access), Some(refresh)) = (&self.access, &self.refresh) {
            store.set_session(access.clone(), refresh.clone());
        }
    }

    /// Persist the store's current state: snapshot it while a session is
    /// live, remove the saved file once it is not. Run after every command,
    /// success or failure — an in-flight refresh may have replaced the
    /// access token or cleared the session entirely, and a cleared session
    /// must not be rehydrated on the next run.
    pub fn sync(store: &dyn SessionStore, username: Option<String>) -> Result<()> {
        Self::sync_to(&Self::session_path()?, store, username)
    }

    fn sync_to(path: &PathBuf, store: &dyn SessionStore, username: Option<String>) -> Result<()> {
        if store.is_authenticated() {
            Self::from_store(store, username).save_to(path)
        } else {
            if path.exists() {
                std::fs::remove_file(path).context("Failed to remove session file")?;
            }
            Ok(())
        }
    }

    fn load_from(path: &PathBuf) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).context("Failed to read session file")?;
        let saved: Self =
            serde_json::from_str(&contents).context("Failed to parse session file")?;
        Ok(Some(saved))
    }

    fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn session_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME).join(SESSION_FILE))
    }
}
