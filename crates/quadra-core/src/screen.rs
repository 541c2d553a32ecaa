//! Top-level screen identifiers.
//!
//! The application shows exactly one screen at a time; the router in the
//! application layer owns which one. Screens that need context carry it
//! in the variant payload (an event id, a dashboard tab) so a screen
//! value is always self-describing.

use serde::{Deserialize, Serialize};

/// Backend event id.
pub type EventId = i64;

/// Backend user id.
pub type UserId = i64;

/// Tabs on the host dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostTab {
    #[default]
    Upcoming,
    Past,
}

/// Tabs on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminTab {
    #[default]
    Users,
    Events,
    Applications,
}

/// Sections of the legal pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegalSection {
    #[default]
    Terms,
    Privacy,
}

/// Sections of the contact page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactSection {
    #[default]
    General,
    Support,
}

/// One top-level view the router can make active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Screen {
    /// Sign-in / registration. The initial screen.
    Login,
    /// Browse, filter, and search events. The student landing screen.
    EventListing,
    /// One event: details, attendees, reviews, join/leave.
    EventDetails { event_id: EventId },
    /// The signed-in user's own profile, with an edit mode.
    Profile,
    /// Host dashboard.
    HostHome { tab: HostTab },
    /// One of the host's own events, with management controls.
    HostEventDetail { event_id: EventId },
    /// Event creation form.
    HostCreateEvent,
    /// Admin dashboard.
    AdminHome { tab: AdminTab },
    /// Admin editing a single user.
    AdminUserEdit { user_id: UserId },
    /// Terms / privacy pages.
    Legal { section: LegalSection },
    /// Contact pages.
    Contact { section: ContactSection },
    /// Student form requesting host status.
    HostRequest,
}

impl Screen {
    /// The host dashboard on its default tab.
    pub fn host_home() -> Self {
        Screen::HostHome {
            tab: HostTab::default(),
        }
    }

    /// The admin dashboard on its default tab.
    pub fn admin_home() -> Self {
        Screen::AdminHome {
            tab: AdminTab::default(),
        }
    }

    /// Whether reaching this screen requires an authenticated session.
    ///
    /// Legal and contact pages stay reachable from the login screen.
    pub fn requires_session(&self) -> bool {
        !matches!(
            self,
            Screen::Login | Screen::Legal { .. } | Screen::Contact { .. }
        )
    }

    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Login => "login",
            Screen::EventListing => "event_listing",
            Screen::EventDetails { .. } => "event_details",
            Screen::Profile => "profile",
            Screen::HostHome { .. } => "host_home",
            Screen::HostEventDetail { .. } => "host_event_detail",
            Screen::HostCreateEvent => "host_create_event",
            Screen::AdminHome { .. } => "admin_home",
            Screen::AdminUserEdit { .. } => "admin_user_edit",
            Screen::Legal { .. } => "legal",
            Screen::Contact { .. } => "contact",
            Screen::HostRequest => "host_request",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_screens() {
        assert!(!Screen::Login.requires_session());
        assert!(
            !Screen::Legal {
                section: LegalSection::Privacy
            }
            .requires_session()
        );
        assert!(
            !Screen::Contact {
                section: ContactSection::General
            }
            .requires_session()
        );
    }

    #[test]
    fn test_authenticated_screens() {
        assert!(Screen::EventListing.requires_session());
        assert!(Screen::Profile.requires_session());
        assert!(Screen::admin_home().requires_session());
        assert!(Screen::HostRequest.requires_session());
    }

    #[test]
    fn test_dashboard_defaults() {
        assert_eq!(
            Screen::host_home(),
            Screen::HostHome {
                tab: HostTab::Upcoming
            }
        );
        assert_eq!(
            Screen::admin_home(),
            Screen::AdminHome {
                tab: AdminTab::Users
            }
        );
    }
}
