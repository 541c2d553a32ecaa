//! Host application endpoints.

use crate::client::{ApiClient, RequestOptions};
use crate::payload::parse_collection;
use quadra_core::error::Result;
use quadra_core::host_application::{
    ApplicationStatus, HostApplication, HostApplicationForm, HostApplicationReceipt,
};
use quadra_core::session::AuthToken;
use serde_json::json;

impl ApiClient {
    /// `POST /api/host-applications` (token required)
    ///
    /// Note the wire field name `event_category` for what the client
    /// models as `category`.
    pub async fn submit_host_application(
        &self,
        token: &AuthToken,
        form: &HostApplicationForm,
    ) -> Result<HostApplicationReceipt> {
        let payload = self
            .request(
                "/api/host-applications",
                RequestOptions::post(json!({
                    "org_name": form.org_name,
                    "event_category": form.category,
                    "motivation": form.motivation
                }))
                .with_token(token),
            )
            .await?;
        serde_json::from_value(payload).map_err(Into::into)
    }

    /// `GET /api/host-applications` (admin)
    pub async fn list_host_applications(
        &self,
        token: &AuthToken,
    ) -> Result<Vec<HostApplication>> {
        let payload = self
            .request(
                "/api/host-applications",
                RequestOptions::get().with_token(token),
            )
            .await?;
        parse_collection(payload, "applications")
    }

    /// `PATCH /api/host-applications/:id/status` (admin)
    ///
    /// The only mutation the client ever performs on an application:
    /// an admin moving it through its status transitions. Applications
    /// are never deleted from the client.
    pub async fn update_host_application_status(
        &self,
        token: &AuthToken,
        application_id: i64,
        status: ApplicationStatus,
    ) -> Result<HostApplication> {
        let payload = self
            .request(
                &format!("/api/host-applications/{application_id}/status"),
                RequestOptions::patch(json!({"status": status})).with_token(token),
            )
            .await?;
        serde_json::from_value(payload).map_err(Into::into)
    }
}
