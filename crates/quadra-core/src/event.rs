//! Event domain models.
//!
//! Events, reviews, and attendee listings are owned by the backend; the
//! client only mirrors them transiently in view state. These models are
//! the canonical in-client shapes the API layer deserializes into.

use crate::screen::{EventId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Publication status of an event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
}

/// A campus event as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub capacity: Option<u32>,
    pub status: EventStatus,
    pub host_id: UserId,
}

/// Fields a host submits when creating or updating an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl From<&Event> for EventForm {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            category: event.category.clone(),
            location: event.location.clone(),
            starts_at: event.starts_at,
            capacity: event.capacity,
        }
    }
}

/// A review left on an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub event_id: EventId,
    pub author: String,
    /// 1..=5
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// One attendee on an event's attendee listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}
