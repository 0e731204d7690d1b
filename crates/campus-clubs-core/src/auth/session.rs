use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{CredentialStore, TokenProvider};

/// Session file name in the data directory
const SESSION_FILE: &str = "session.json";

/// Where the bearer token itself is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStorage {
    /// In `session.json` alongside the user id
    #[default]
    File,
    /// In the OS keychain; `session.json` keeps only the user id
    Keyring,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub user_uid: String,
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: String, user_uid: String, email: Option<String>) -> Self {
        Self {
            token: Some(token),
            user_uid,
            email,
            created_at: Utc::now(),
        }
    }
}

/// The persisted login session.
///
/// Every read goes to storage, so two handles on the same directory always
/// agree on whether a user is signed in.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
    storage: TokenStorage,
}

impl SessionStore {
    pub fn new(dir: PathBuf, storage: TokenStorage) -> Self {
        Self { dir, storage }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the session from storage, `None` when nobody is signed in
    pub fn load(&self) -> Result<Option<SessionData>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path).context("Failed to read session file")?;
        let mut data: SessionData =
            serde_json::from_str(&contents).context("Failed to parse session file")?;

        if self.storage == TokenStorage::Keyring {
            data.token = CredentialStore::get_token()?;
        }

        Ok(Some(data))
    }

    /// Write the session, replacing whatever was stored
    pub fn save(&self, data: &SessionData) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let on_disk = if self.storage == TokenStorage::Keyring {
            let (on_disk, update) = split_keychain_token(data);
            match update {
                KeychainUpdate::Store(token) => CredentialStore::store_token(&token)?,
                KeychainUpdate::Delete => CredentialStore::delete_token()?,
            }
            on_disk
        } else {
            data.clone()
        };

        let contents = serde_json::to_string_pretty(&on_disk)?;
        std::fs::write(&path, contents).context("Failed to write session file")?;
        debug!(path = %path.display(), "Session saved");
        Ok(())
    }

    /// Remove the session from storage
    pub fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove session file")?;
        }
        if self.storage == TokenStorage::Keyring {
            CredentialStore::delete_token()?;
        }
        Ok(())
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}

/// Change a keyring-mode save makes to the keychain
#[derive(Debug, PartialEq)]
enum KeychainUpdate {
    Store(String),
    Delete,
}

/// Split a session into its file part and the keychain change.
///
/// A session without a token deletes the keychain entry, so a stale token
/// cannot come back on the next load.
fn split_keychain_token(data: &SessionData) -> (SessionData, KeychainUpdate) {
    let mut on_disk = data.clone();
    let update = match on_disk.token.take() {
        Some(token) => KeychainUpdate::Store(token),
        None => KeychainUpdate::Delete,
    };
    (on_disk, update)
}

impl TokenProvider for SessionStore {
    fn bearer_token(&self) -> Option<String> {
        match self.load() {
            Ok(data) => data.and_then(|d| d.token).filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read session, sending request unauthenticated");
                None
            }
        }
    }
}
