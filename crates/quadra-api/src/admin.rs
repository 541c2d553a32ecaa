//! Admin user-management endpoints.

use crate::client::{ApiClient, RequestOptions};
use crate::payload::parse_managed_user;
use quadra_core::error::Result;
use quadra_core::screen::UserId;
use quadra_core::session::{AuthToken, Role};
use quadra_core::user::{ManagedUser, UserUpdate};
use serde_json::Value;

impl ApiClient {
    /// `GET /api/admin/users`
    pub async fn list_users(&self, token: &AuthToken) -> Result<Vec<ManagedUser>> {
        let payload = self
            .request("/api/admin/users", RequestOptions::get().with_token(token))
            .await?;
        let items = match payload {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("users").or_else(|| map.remove("data")) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(quadra_core::QuadraError::validation(
                        "response carries no 'users' collection",
                    ));
                }
            },
            other => {
                return Err(quadra_core::QuadraError::validation(format!(
                    "expected a user collection, got: {other}"
                )));
            }
        };
        items.iter().map(parse_managed_user).collect()
    }

    /// `GET /api/admin/users/:id`
    pub async fn get_user(&self, token: &AuthToken, user_id: UserId) -> Result<ManagedUser> {
        let payload = self
            .request(
                &format!("/api/admin/users/{user_id}"),
                RequestOptions::get().with_token(token),
            )
            .await?;
        parse_managed_user(&payload)
    }

    /// `PUT /api/admin/users/:id`
    pub async fn update_user(
        &self,
        token: &AuthToken,
        user_id: UserId,
        update: &UserUpdate,
    ) -> Result<ManagedUser> {
        let payload = self
            .request(
                &format!("/api/admin/users/{user_id}"),
                RequestOptions::put(serde_json::to_value(update)?).with_token(token),
            )
            .await?;
        parse_managed_user(&payload)
    }

    /// `DELETE /api/admin/users/:id`
    pub async fn delete_user(&self, token: &AuthToken, user_id: UserId) -> Result<()> {
        self.request(
            &format!("/api/admin/users/{user_id}"),
            RequestOptions::delete().with_token(token),
        )
        .await?;
        Ok(())
    }

    /// `GET /api/admin/roles`
    pub async fn list_roles(&self, token: &AuthToken) -> Result<Vec<Role>> {
        let payload = self
            .request("/api/admin/roles", RequestOptions::get().with_token(token))
            .await?;
        Ok(Role::normalize(&payload).into_iter().collect())
    }

    /// `POST /api/admin/hosts/:id/reactivate`
    pub async fn reactivate_host(
        &self,
        token: &AuthToken,
        user_id: UserId,
    ) -> Result<ManagedUser> {
        let payload = self
            .request(
                &format!("/api/admin/hosts/{user_id}/reactivate"),
                RequestOptions {
                    method: Some(reqwest::Method::POST),
                    body: None,
                    token: Some(token),
                },
            )
            .await?;
        parse_managed_user(&payload)
    }
}
