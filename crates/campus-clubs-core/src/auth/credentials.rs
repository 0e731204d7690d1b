use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "campus-clubs";

/// Keychain account the session token is filed under
const TOKEN_ACCOUNT: &str = "session-token";

/// Bearer token storage in the OS keychain
pub struct CredentialStore;

impl CredentialStore {
    fn entry() -> Result<Entry> {
        Entry::new(SERVICE_NAME, TOKEN_ACCOUNT).context("Failed to create keyring entry")
    }

    /// Store the bearer token in the OS keychain
    pub fn store_token(token: &str) -> Result<()> {
        Self::entry()?
            .set_password(token)
            .context("Failed to store token in keychain")?;
        Ok(())
    }

    /// Retrieve the bearer token, `None` when nothing is stored
    pub fn get_token() -> Result<Option<String>> {
        match Self::entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve token from keychain"),
        }
    }

    /// Delete the stored token; deleting a missing entry is not an error
    pub fn delete_token() -> Result<()> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}
