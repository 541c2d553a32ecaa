//! Event, attendance, and review endpoints.

use crate::client::{ApiClient, RequestOptions};
use crate::payload::parse_collection;
use quadra_core::error::{QuadraError, Result};
use quadra_core::event::{Attendee, Event, EventForm, EventStatus, Review};
use quadra_core::screen::EventId;
use quadra_core::session::AuthToken;
use serde_json::json;

impl ApiClient {
    /// `GET /api/events`
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let payload = self.request("/api/events", RequestOptions::get()).await?;
        parse_collection(payload, "events")
    }

    /// `GET /api/events/:id`
    pub async fn get_event(&self, event_id: EventId) -> Result<Event> {
        let payload = self
            .request(&format!("/api/events/{event_id}"), RequestOptions::get())
            .await?;
        serde_json::from_value(payload).map_err(Into::into)
    }

    /// `POST /api/events`
    pub async fn create_event(&self, token: &AuthToken, form: &EventForm) -> Result<Event> {
        let payload = self
            .request(
                "/api/events",
                RequestOptions::post(serde_json::to_value(form)?).with_token(token),
            )
            .await?;
        serde_json::from_value(payload).map_err(Into::into)
    }

    /// `PUT /api/events/:id`
    pub async fn update_event(
        &self,
        token: &AuthToken,
        event_id: EventId,
        form: &EventForm,
    ) -> Result<Event> {
        let payload = self
            .request(
                &format!("/api/events/{event_id}"),
                RequestOptions::put(serde_json::to_value(form)?).with_token(token),
            )
            .await?;
        serde_json::from_value(payload).map_err(Into::into)
    }

    /// `DELETE /api/events/:id`
    pub async fn delete_event(&self, token: &AuthToken, event_id: EventId) -> Result<()> {
        self.request(
            &format!("/api/events/{event_id}"),
            RequestOptions::delete().with_token(token),
        )
        .await?;
        Ok(())
    }

    /// `PATCH /api/events/:id/status`
    pub async fn update_event_status(
        &self,
        token: &AuthToken,
        event_id: EventId,
        status: EventStatus,
    ) -> Result<Event> {
        let payload = self
            .request(
                &format!("/api/events/{event_id}/status"),
                RequestOptions::patch(json!({"status": status})).with_token(token),
            )
            .await?;
        serde_json::from_value(payload).map_err(Into::into)
    }

    /// `GET /api/events/:id/attendees`
    pub async fn list_attendees(
        &self,
        token: &AuthToken,
        event_id: EventId,
    ) -> Result<Vec<Attendee>> {
        let payload = self
            .request(
                &format!("/api/events/{event_id}/attendees"),
                RequestOptions::get().with_token(token),
            )
            .await?;
        parse_collection(payload, "attendees")
    }

    /// `POST /api/events/:id/join`
    pub async fn join_event(&self, token: &AuthToken, event_id: EventId) -> Result<()> {
        self.request(
            &format!("/api/events/{event_id}/join"),
            RequestOptions {
                method: Some(reqwest::Method::POST),
                body: None,
                token: Some(token),
            },
        )
        .await?;
        Ok(())
    }

    /// `DELETE /api/events/:id/join`
    pub async fn leave_event(&self, token: &AuthToken, event_id: EventId) -> Result<()> {
        self.request(
            &format!("/api/events/{event_id}/join"),
            RequestOptions::delete().with_token(token),
        )
        .await?;
        Ok(())
    }

    /// `GET /api/events/:id/reviews`
    pub async fn list_reviews(&self, event_id: EventId) -> Result<Vec<Review>> {
        let payload = self
            .request(
                &format!("/api/events/{event_id}/reviews"),
                RequestOptions::get(),
            )
            .await?;
        parse_collection(payload, "reviews")
    }

    /// `POST /api/events/:id/reviews`
    ///
    /// The rating bound is checked locally so an out-of-range value
    /// never reaches the wire.
    pub async fn submit_review(
        &self,
        token: &AuthToken,
        event_id: EventId,
        rating: u8,
        comment: &str,
    ) -> Result<Review> {
        if !(1..=5).contains(&rating) {
            return Err(QuadraError::validation("rating must be between 1 and 5"));
        }
        let payload = self
            .request(
                &format!("/api/events/{event_id}/reviews"),
                RequestOptions::post(json!({"rating": rating, "comment": comment}))
                    .with_token(token),
            )
            .await?;
        serde_json::from_value(payload).map_err(Into::into)
    }
}
