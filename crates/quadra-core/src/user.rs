//! User administration models.
//!
//! Admin screens manage other accounts: listing, editing roles, and
//! deactivating or deleting users. These are the client-side mirrors of
//! those records, separate from [`crate::session::Session`] which only
//! ever describes the signed-in user.

use crate::screen::UserId;
use crate::session::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An account as seen through the admin user-management endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
    /// Deactivated accounts keep their record but cannot sign in.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// The editable portion of a managed user, used as the draft type in
/// the admin user-edit screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub roles: BTreeSet<Role>,
    pub active: bool,
}

impl From<&ManagedUser> for UserUpdate {
    fn from(user: &ManagedUser) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
            active: user.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_defaults_to_true() {
        let user: ManagedUser = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "B",
            "email": "b@campus.edu"
        }))
        .unwrap();
        assert!(user.active);
        assert!(user.roles.is_empty());
    }

    #[test]
    fn test_update_from_managed_user() {
        let user = ManagedUser {
            id: 2,
            name: "B".to_string(),
            email: "b@campus.edu".to_string(),
            roles: BTreeSet::from([Role::Host]),
            active: true,
        };
        let update = UserUpdate::from(&user);
        assert_eq!(update.roles, BTreeSet::from([Role::Host]));
    }
}
