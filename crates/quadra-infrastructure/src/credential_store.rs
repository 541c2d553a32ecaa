//! Credential store implementations.
//!
//! Two keys back the persisted session: the bearer token in
//! `auth_token.toml` and the account record in `account.json`. They are
//! written together under an exclusive lock and treated as one unit on
//! load; a half-present or malformed pair is cleaned up and reported
//! as absent, never surfaced as a broken session.

use crate::paths::QuadraPaths;
use fs2::FileExt;
use quadra_core::credential::{CredentialStore, StoredCredentials};
use quadra_core::error::{QuadraError, Result};
use quadra_core::session::{AccountRecord, AuthToken};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

/// On-disk shape of `auth_token.toml`.
#[derive(Debug, Serialize, Deserialize)]
struct TokenFile {
    token: String,
}

/// File-backed credential store under the platform config directory.
pub struct FileCredentialStore {
    paths: QuadraPaths,
}

impl FileCredentialStore {
    /// Store rooted at the platform config directory.
    pub fn new() -> Self {
        Self {
            paths: QuadraPaths::default(),
        }
    }

    /// Store rooted at an explicit directory (tests, portable profiles).
    pub fn with_base(base: &Path) -> Self {
        Self {
            paths: QuadraPaths::new(Some(base)),
        }
    }

    /// Takes the exclusive write lock for the credential pair.
    ///
    /// The lock is released when the returned handle drops.
    fn acquire_lock(&self) -> Result<File> {
        let dir = self.paths.config_dir()?;
        fs::create_dir_all(&dir)?;
        let lock = File::create(self.paths.lock_file()?)?;
        lock.lock_exclusive()
            .map_err(|e| QuadraError::storage(format!("failed to lock credential store: {e}")))?;
        Ok(lock)
    }

    fn read_pair(&self) -> Result<Option<StoredCredentials>> {
        let token_path = self.paths.token_file()?;
        let account_path = self.paths.account_file()?;
        if !token_path.exists() || !account_path.exists() {
            return Ok(None);
        }

        let token_raw = fs::read_to_string(&token_path)?;
        let token_file: TokenFile = toml::from_str(&token_raw)?;
        let token = AuthToken::new(token_file.token)?;

        let account_raw = fs::read_to_string(&account_path)?;
        let account: AccountRecord = serde_json::from_str(&account_raw)?;

        Ok(Some(StoredCredentials { token, account }))
    }

    fn remove_pair(&self) -> Result<()> {
        for path in [self.paths.token_file()?, self.paths.account_file()?] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<StoredCredentials>> {
        let _lock = self.acquire_lock()?;
        match self.read_pair() {
            Ok(pair) => {
                // A lone half of the pair is a remnant of an interrupted
                // write; clear it so the next load starts clean.
                if pair.is_none() {
                    self.remove_pair()?;
                }
                Ok(pair)
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored credentials are malformed, clearing");
                self.remove_pair()?;
                Ok(None)
            }
        }
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        let _lock = self.acquire_lock()?;

        let token_file = TokenFile {
            token: credentials.token.as_str().to_string(),
        };
        write_atomically(
            &self.paths.token_file()?,
            toml::to_string_pretty(&token_file)?.as_bytes(),
        )?;
        write_atomically(
            &self.paths.account_file()?,
            serde_json::to_vec_pretty(&credentials.account)?.as_slice(),
        )?;

        tracing::debug!(user_id = credentials.account.id, "credentials persisted");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _lock = self.acquire_lock()?;
        self.remove_pair()?;
        tracing::debug!("credentials cleared");
        Ok(())
    }
}

/// Writes via a sibling temp file and rename so readers never observe a
/// partially written file.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// In-memory credential store, the substitutable fake for tests.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<StoredCredentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<StoredCredentials>> {
        Ok(self
            .inner
            .lock()
            .map_err(|_| QuadraError::storage("credential store mutex poisoned"))?
            .clone())
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        *self
            .inner
            .lock()
            .map_err(|_| QuadraError::storage("credential store mutex poisoned"))? =
            Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self
            .inner
            .lock()
            .map_err(|_| QuadraError::storage("credential store mutex poisoned"))? = None;
        Ok(())
    }
}
