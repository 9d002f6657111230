use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "herdbook";

/// Remembered login password for one account, held in the OS keychain
/// under the `herdbook` service. Used by `login --remember`, and emptied
/// again on logout.
pub struct CredentialStore {
    username: String,
}

impl CredentialStore {
    pub fn for_user(username: &str) -> Self {
        Self {
            username: username.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(SERVICE_NAME, &self.username).context("Failed to create keyring entry")
    }

    /// Remember the password for this account
    pub fn remember(&self, password: &str) -> Result<()> {
        self.entry()?
            .set_password(password)
            .context("Failed to store password in keychain")
    }

    /// Retrieve the remembered password
    pub fn password(&self) -> Result<String> {
        self.entry()?
            .get_password()
            .context("Failed to retrieve password from keychain")
    }

    /// Drop the remembered password
    pub fn forget(&self) -> Result<()> {
        self.entry()?
            .delete_credential()
            .context("Failed to delete credential from keychain")
    }

    /// Whether a password is remembered for this account
    pub fn exists(&self) -> bool {
        self.entry().map(|e| e.get_password().is_ok()).unwrap_or(false)
    }
}
