//! Unified path management for Quadra's durable client state.
//!
//! Everything the client persists lives under one per-user directory so
//! sign-out can clear it wholesale and tests can point the whole stack
//! at a temp directory.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/quadra/            # Config directory (platform-dependent)
//! ├── auth_token.toml          # Bearer token
//! ├── account.json             # Serialized account record
//! └── credentials.lock         # Write lock shared by both files
//! ```

use quadra_core::error::{QuadraError, Result};
use std::path::{Path, PathBuf};

/// Unified path management for Quadra.
///
/// A base path override replaces the platform config directory; tests
/// use this to isolate storage under a temp directory.
#[derive(Debug, Clone, Default)]
pub struct QuadraPaths {
    base: Option<PathBuf>,
}

impl QuadraPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the Quadra configuration directory.
    ///
    /// The override base when set, otherwise the platform config
    /// directory (e.g. `~/.config/quadra/`).
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("quadra"))
            .ok_or_else(|| QuadraError::config("cannot determine the platform config directory"))
    }

    /// Path to the persisted bearer token.
    pub fn token_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("auth_token.toml"))
    }

    /// Path to the persisted account record.
    pub fn account_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("account.json"))
    }

    /// Path to the lock file guarding credential writes.
    pub fn lock_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("credentials.lock"))
    }
}
