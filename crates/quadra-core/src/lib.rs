//! Domain models and ports for the Quadra client.
//!
//! This crate holds everything the application layer reasons about
//! without touching the network or the filesystem: the session and role
//! model, the closed set of screens, the backend entity mirrors, the
//! shared error taxonomy, the credential persistence port, and the
//! reusable interaction state machines.

pub mod credential;
pub mod error;
pub mod event;
pub mod host_application;
pub mod interaction;
pub mod screen;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::{QuadraError, Result};
