//! Credential persistence port.
//!
//! Defines the interface for durable session storage, decoupling the
//! application layer from the concrete mechanism (files under the
//! platform config directory in production, a map in tests).

use crate::error::Result;
use crate::session::{AccountRecord, AuthToken, Session};
use serde::{Deserialize, Serialize};

/// What survives a restart: the bearer token and the account record.
///
/// The two values are one unit: they are persisted together on login,
/// cleared together on logout, and a store that finds only one of them
/// must treat the pair as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: AuthToken,
    pub account: AccountRecord,
}

impl StoredCredentials {
    /// Rebuilds the in-memory session these credentials describe.
    pub fn into_session(self) -> Session {
        Session::from_parts(self.token, self.account)
    }
}

impl From<&Session> for StoredCredentials {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.clone(),
            account: session.to_account_record(),
        }
    }
}

/// An abstract store for the persisted credential pair.
///
/// Implementations must keep the pair atomic from the caller's
/// perspective: `load` never observes a half-written state, and a
/// malformed or half-present pair is reported as absent (after cleaning
/// up the remnant) rather than as an error the caller cannot act on.
pub trait CredentialStore: Send + Sync {
    /// Reads the stored pair, if both halves are present and well-formed.
    fn load(&self) -> Result<Option<StoredCredentials>>;

    /// Persists the pair, replacing any previous values.
    fn save(&self, credentials: &StoredCredentials) -> Result<()>;

    /// Removes both halves. Succeeds when nothing was stored.
    fn clear(&self) -> Result<()>;
}
