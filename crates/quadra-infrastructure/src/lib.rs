//! Durable client-side storage for Quadra.
//!
//! Implements the persistence ports defined in `quadra-core`: platform
//! path resolution and the file-backed credential store, plus the
//! in-memory fake used by tests.

pub mod credential_store;
pub mod paths;

pub use credential_store::{FileCredentialStore, MemoryCredentialStore};
pub use paths::QuadraPaths;
