//! Session domain model.
//!
//! This module contains the core [`Session`] entity plus the two pieces
//! it is assembled from: the opaque [`AuthToken`] and the persisted
//! [`AccountRecord`]. An anonymous visitor is represented as the absence
//! of a session (`Option<Session>`) at the owner, never as a session
//! with empty fields.

use super::role::Role;
use crate::error::{QuadraError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// An opaque bearer token issued by the backend.
///
/// Non-empty by construction. The token value never appears in `Debug`
/// output so it cannot leak through logging.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw token string, rejecting empty or whitespace-only input.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(QuadraError::validation("authentication token is empty"));
        }
        Ok(Self(raw))
    }

    /// The raw token value, for the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// The persisted user record.
///
/// This is what survives a page reload in durable storage: identity
/// fields plus the role memberships, already normalized to the
/// canonical [`Role`] set. Rebuilt from backend payloads via
/// [`AccountRecord::from_payload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Backend user id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Normalized role memberships
    #[serde(default)]
    pub roles: BTreeSet<Role>,
    /// Token expiry, when the backend reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccountRecord {
    /// Builds an account record from a backend `user` payload.
    ///
    /// Requires `id`, `name`, and `email`; role indicators are taken from
    /// wherever the payload carries them (`roles`, `role`, or nothing)
    /// and normalized. A payload without a recognizable id/name/email is
    /// rejected as a validation failure rather than guessed at.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let id = payload
            .get("id")
            .and_then(value_as_i64)
            .ok_or_else(|| QuadraError::validation("user payload is missing an id"))?;
        let name = required_string(payload, "name")?;
        let email = required_string(payload, "email")?;

        let expires_at = payload
            .get("expires_at")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc));

        // Role indicators live under `roles` or `role` depending on the
        // backend code path; a payload with neither is a roleless account.
        let roles = payload
            .get("roles")
            .or_else(|| payload.get("role"))
            .map(Role::normalize)
            .unwrap_or_default();

        Ok(Self {
            id,
            name,
            email,
            roles,
            expires_at,
        })
    }
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn required_string(payload: &Value, field: &str) -> Result<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| QuadraError::validation(format!("user payload is missing '{field}'")))
}

/// The in-memory representation of the authenticated user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Backend user id
    pub user_id: i64,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Role memberships (possibly empty; see [`Session::effective_roles`])
    pub roles: BTreeSet<Role>,
    /// Bearer token for authenticated calls
    pub token: AuthToken,
    /// Token expiry, when known
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Assembles a session from a token and an account record.
    pub fn from_parts(token: AuthToken, account: AccountRecord) -> Self {
        Self {
            user_id: account.id,
            name: account.name,
            email: account.email,
            roles: account.roles,
            token,
            expires_at: account.expires_at,
        }
    }

    /// Converts back to the persistable account record.
    pub fn to_account_record(&self) -> AccountRecord {
        AccountRecord {
            id: self.user_id,
            name: self.name.clone(),
            email: self.email.clone(),
            roles: self.roles.clone(),
            expires_at: self.expires_at,
        }
    }

    /// The roles this session acts with.
    ///
    /// A session with zero granted roles behaves as a plain Student.
    pub fn effective_roles(&self) -> BTreeSet<Role> {
        if self.roles.is_empty() {
            BTreeSet::from([Role::Student])
        } else {
            self.roles.clone()
        }
    }

    /// Whether the session acts with the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.effective_roles().contains(&role)
    }
}
