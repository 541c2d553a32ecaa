//! Authentication endpoints.

use crate::client::{ApiClient, RequestOptions};
use quadra_core::credential::StoredCredentials;
use quadra_core::error::{QuadraError, Result};
use quadra_core::session::{AccountRecord, AuthToken};
use serde_json::{Value, json};

impl ApiClient {
    /// `POST /api/auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<StoredCredentials> {
        let payload = self
            .request(
                "/api/auth/login",
                RequestOptions::post(json!({"email": email, "password": password})),
            )
            .await?;
        parse_auth_success(&payload)
    }

    /// `POST /api/auth/register`
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<StoredCredentials> {
        let payload = self
            .request(
                "/api/auth/register",
                RequestOptions::post(json!({
                    "name": name,
                    "email": email,
                    "password": password
                })),
            )
            .await?;
        parse_auth_success(&payload)
    }
}

/// Normalizes a `{token, user}` auth response into stored credentials.
///
/// Role indicators in the user record are normalized here, at the
/// boundary, so nothing downstream ever sees the backend's duck-typed
/// role shapes.
pub fn parse_auth_success(payload: &Value) -> Result<StoredCredentials> {
    let token = payload
        .get("token")
        .and_then(Value::as_str)
        .ok_or_else(|| QuadraError::validation("auth response is missing a token"))?;
    let token = AuthToken::new(token)?;

    let user = payload
        .get("user")
        .ok_or_else(|| QuadraError::validation("auth response is missing the user record"))?;
    let account = AccountRecord::from_payload(user)?;

    Ok(StoredCredentials { token, account })
}
