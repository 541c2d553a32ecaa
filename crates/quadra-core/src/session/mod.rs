//! Session domain: the authenticated user, their token, and their roles.

pub mod model;
pub mod role;

pub use model::{AccountRecord, AuthToken, Session};
pub use role::Role;
