//! Host application domain models.
//!
//! A student applies for host status; an admin approves or denies it.
//! The client submits and displays applications but never deletes one,
//! and status transitions happen only through admin actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Review status of a host application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Denied,
}

/// A host application as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostApplication {
    pub id: i64,
    pub org_name: String,
    pub category: String,
    pub motivation: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Fields a student fills in when requesting host status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostApplicationForm {
    pub org_name: String,
    pub category: String,
    pub motivation: String,
}

/// The backend's acknowledgement of a submitted application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostApplicationReceipt {
    pub application_id: i64,
    pub status: ApplicationStatus,
}
