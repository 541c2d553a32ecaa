//! Role membership and backend payload normalization.
//!
//! The backend is not consistent about how it reports role membership:
//! named strings, numeric codes, single values, arrays, and objects with
//! a `roles`/`role`/`name` field all occur. Everything funnels through
//! [`Role::normalize`] at the client boundary so the rest of the
//! application only ever sees the canonical [`Role`] set.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use strum_macros::{Display, EnumString};

/// A role the backend can grant to an account.
///
/// A session may hold several roles at once (e.g. Student + Host).
/// An account with no recognizable roles is treated as a plain Student.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Student,
    Host,
    Admin,
}

impl Role {
    /// Maps a single role indicator to a [`Role`], if recognizable.
    ///
    /// Accepted shapes:
    /// - named strings, any case (`"admin"`, `"Host"`, `"administrator"`)
    /// - numeric codes (`1` = Student, `2` = Host, `3` = Admin)
    /// - objects carrying the indicator under `name` or `role`
    pub fn from_indicator(value: &Value) -> Option<Role> {
        match value {
            Value::String(name) => Self::from_name(name),
            Value::Number(code) => code.as_i64().and_then(Self::from_code),
            Value::Object(map) => map
                .get("name")
                .or_else(|| map.get("role"))
                .and_then(Self::from_indicator),
            _ => None,
        }
    }

    fn from_name(name: &str) -> Option<Role> {
        match name.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Role::Student),
            "host" => Some(Role::Host),
            "admin" | "administrator" => Some(Role::Admin),
            _ => None,
        }
    }

    fn from_code(code: i64) -> Option<Role> {
        match code {
            1 => Some(Role::Student),
            2 => Some(Role::Host),
            3 => Some(Role::Admin),
            _ => None,
        }
    }

    /// Normalizes an arbitrary backend role payload into the canonical set.
    ///
    /// Handles single indicators, arrays of indicators, and objects that
    /// nest the list under `roles` (or a single value under `role`).
    /// Unrecognized indicators are dropped with a warning; normalization
    /// never fails.
    pub fn normalize(value: &Value) -> BTreeSet<Role> {
        let mut roles = BTreeSet::new();
        collect(value, &mut roles);
        roles
    }
}

fn collect(value: &Value, roles: &mut BTreeSet<Role>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect(item, roles);
            }
        }
        Value::Object(map) => {
            if let Some(nested) = map.get("roles") {
                collect(nested, roles);
            } else if let Some(single) = map.get("role") {
                collect(single, roles);
            } else if let Some(role) = Role::from_indicator(value) {
                roles.insert(role);
            } else {
                tracing::warn!(payload = %value, "dropping unrecognized role indicator");
            }
        }
        Value::Null => {}
        other => match Role::from_indicator(other) {
            Some(role) => {
                roles.insert(role);
            }
            None => {
                tracing::warn!(payload = %other, "dropping unrecognized role indicator");
            }
        },
    }
}
