//! Backend payload normalization helpers.
//!
//! Collection endpoints are inconsistent about their envelope: some
//! return a bare array, others wrap it under a named key or `data`.
//! User records carry duck-typed role indicators. Both get normalized
//! here so the endpoint wrappers can deserialize straight into the
//! canonical models.

use quadra_core::error::{QuadraError, Result};
use quadra_core::user::ManagedUser;
use quadra_core::session::Role;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserializes a collection response, unwrapping `{<key>: [...]}` and
/// `{data: [...]}` envelopes around the bare array.
pub fn parse_collection<T: DeserializeOwned>(payload: Value, key: &str) -> Result<Vec<T>> {
    let items = match payload {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map
            .remove(key)
            .or_else(|| map.remove("data"))
            .ok_or_else(|| {
                QuadraError::validation(format!("response carries no '{key}' collection"))
            })?,
        other => {
            return Err(QuadraError::validation(format!(
                "expected a collection, got: {other}"
            )));
        }
    };
    serde_json::from_value(items).map_err(Into::into)
}

/// Builds a [`ManagedUser`] from an admin endpoint payload, running the
/// role indicators through [`Role::normalize`].
pub fn parse_managed_user(payload: &Value) -> Result<ManagedUser> {
    let id = payload
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| QuadraError::validation("user payload is missing an id"))?;
    let name = string_field(payload, "name")?;
    let email = string_field(payload, "email")?;
    let roles = payload
        .get("roles")
        .or_else(|| payload.get("role"))
        .map(Role::normalize)
        .unwrap_or_default();
    let active = payload
        .get("active")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    Ok(ManagedUser {
        id,
        name,
        email,
        roles,
        active,
    })
}

fn string_field(payload: &Value, field: &str) -> Result<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| QuadraError::validation(format!("user payload is missing '{field}'")))
}
