//! Backend gateway port for the application controller.
//!
//! The controller orchestrates a handful of backend operations; this
//! trait is that seam, implemented by the real [`ApiClient`] and by
//! fakes in tests. Screens that talk to the backend directly (event
//! listings, reviews) use the client's typed wrappers as-is; only the
//! operations the controller itself sequences go through the port.

use async_trait::async_trait;
use quadra_api::ApiClient;
use quadra_core::credential::StoredCredentials;
use quadra_core::error::Result;
use quadra_core::host_application::{HostApplicationForm, HostApplicationReceipt};
use quadra_core::screen::UserId;
use quadra_core::session::AuthToken;
use quadra_core::user::{ManagedUser, UserUpdate};

#[async_trait]
pub trait ApiGateway: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<StoredCredentials>;

    async fn register(&self, name: &str, email: &str, password: &str)
    -> Result<StoredCredentials>;

    async fn submit_host_application(
        &self,
        token: &AuthToken,
        form: &HostApplicationForm,
    ) -> Result<HostApplicationReceipt>;

    async fn update_user(
        &self,
        token: &AuthToken,
        user_id: UserId,
        update: &UserUpdate,
    ) -> Result<ManagedUser>;

    async fn delete_user(&self, token: &AuthToken, user_id: UserId) -> Result<()>;
}

#[async_trait]
impl ApiGateway for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<StoredCredentials> {
        ApiClient::login(self, email, password).await
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<StoredCredentials> {
        ApiClient::register(self, name, email, password).await
    }

    async fn submit_host_application(
        &self,
        token: &AuthToken,
        form: &HostApplicationForm,
    ) -> Result<HostApplicationReceipt> {
        ApiClient::submit_host_application(self, token, form).await
    }

    async fn update_user(
        &self,
        token: &AuthToken,
        user_id: UserId,
        update: &UserUpdate,
    ) -> Result<ManagedUser> {
        ApiClient::update_user(self, token, user_id, update).await
    }

    async fn delete_user(&self, token: &AuthToken, user_id: UserId) -> Result<()> {
        ApiClient::delete_user(self, token, user_id).await
    }
}
