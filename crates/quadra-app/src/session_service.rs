//! Session lifecycle with write-through persistence.

use quadra_core::credential::{CredentialStore, StoredCredentials};
use quadra_core::error::Result;
use quadra_core::session::{AuthToken, Session};
use std::sync::Arc;

/// Owns the in-memory session and keeps it in lock-step with durable
/// storage.
///
/// Every mutation writes through immediately: `login` persists before
/// swapping the in-memory state, `logout` clears both together. The
/// in-memory session and the store never diverge for longer than one
/// method call, and a failed persist leaves the in-memory state
/// untouched.
pub struct SessionService {
    store: Arc<dyn CredentialStore>,
    current: Option<Session>,
}

impl SessionService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Reads durable storage once at application start.
    ///
    /// A well-formed pair becomes the active session; anything else
    /// (absent, half-present, malformed) leaves the service anonymous.
    pub fn restore(&mut self) -> Result<Option<&Session>> {
        let restored = self.store.load()?;
        self.current = restored.map(StoredCredentials::into_session);
        match &self.current {
            Some(session) => {
                tracing::info!(user_id = session.user_id, "session restored from storage");
            }
            None => tracing::debug!("no stored session, starting anonymous"),
        }
        Ok(self.current.as_ref())
    }

    /// Installs a freshly authenticated session.
    ///
    /// Persists first; the in-memory state only changes once storage
    /// has the same values.
    pub fn login(&mut self, credentials: StoredCredentials) -> Result<&Session> {
        self.store.save(&credentials)?;
        let session = credentials.into_session();
        tracing::info!(user_id = session.user_id, "signed in");
        Ok(self.current.insert(session))
    }

    /// Clears the session, in memory and in storage.
    ///
    /// The in-memory session is dropped even if the storage clear
    /// fails: an anonymous client with stale files on disk recovers on
    /// the next load; a signed-in client backed by nothing does not.
    pub fn logout(&mut self) -> Result<()> {
        self.current = None;
        tracing::info!("signed out");
        self.store.clear()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.current.as_ref().map(|s| &s.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadra_core::error::QuadraError;
    use quadra_core::session::{AccountRecord, Role};
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    fn credentials(token: &str) -> StoredCredentials {
        StoredCredentials {
            token: AuthToken::new(token).unwrap(),
            account: AccountRecord {
                id: 1,
                name: "A".to_string(),
                email: "a@b.com".to_string(),
                roles: BTreeSet::from([Role::Student]),
                expires_at: None,
            },
        }
    }

    /// Store whose save always fails, for the no-divergence invariant.
    struct FailingStore;

    impl CredentialStore for FailingStore {
        fn load(&self) -> Result<Option<StoredCredentials>> {
            Ok(None)
        }
        fn save(&self, _credentials: &StoredCredentials) -> Result<()> {
            Err(QuadraError::storage("disk full"))
        }
        fn clear(&self) -> Result<()> {
            Ok(())
        }
    }

    /// Minimal in-memory store local to these tests.
    #[derive(Default)]
    struct MapStore {
        inner: Mutex<Option<StoredCredentials>>,
    }

    impl CredentialStore for MapStore {
        fn load(&self) -> Result<Option<StoredCredentials>> {
            Ok(self.inner.lock().unwrap().clone())
        }
        fn save(&self, credentials: &StoredCredentials) -> Result<()> {
            *self.inner.lock().unwrap() = Some(credentials.clone());
            Ok(())
        }
        fn clear(&self) -> Result<()> {
            *self.inner.lock().unwrap() = None;
            Ok(())
        }
    }

    #[test]
    fn test_login_then_restore_round_trip() {
        let store = Arc::new(MapStore::default());
        let mut service = SessionService::new(store.clone());
        service.login(credentials("t1")).unwrap();
        let before = service.current().unwrap().clone();

        let mut fresh = SessionService::new(store);
        fresh.restore().unwrap();
        assert_eq!(fresh.current(), Some(&before));
    }

    #[test]
    fn test_failed_persist_leaves_service_anonymous() {
        let mut service = SessionService::new(Arc::new(FailingStore));
        assert!(service.login(credentials("t1")).is_err());
        assert!(!service.is_authenticated());
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let store = Arc::new(MapStore::default());
        let mut service = SessionService::new(store.clone());
        service.login(credentials("t1")).unwrap();
        service.logout().unwrap();
        assert!(!service.is_authenticated());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_restore_with_empty_store() {
        let mut service = SessionService::new(Arc::new(MapStore::default()));
        assert!(service.restore().unwrap().is_none());
        assert!(service.token().is_none());
    }
}
