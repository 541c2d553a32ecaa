//! Per-screen view state composed from the shared interaction machines.
//!
//! These structs hold everything a screen keeps locally: edit drafts,
//! confirm gates, submit guards. They contain no I/O; the controller
//! performs the network round-trips and calls back into them with the
//! outcome.

use quadra_core::event::{Event, EventForm};
use quadra_core::interaction::{ConfirmGate, EditDraft, SubmitGuard};
use quadra_core::screen::{EventId, UserId};
use quadra_core::session::Session;
use quadra_core::user::{ManagedUser, UserUpdate};
use serde::{Deserialize, Serialize};

/// Local state of the admin user-edit screen.
#[derive(Debug, Clone, PartialEq)]
pub struct UserEditScreen {
    pub user_id: UserId,
    pub edit: EditDraft<UserUpdate>,
    pub delete_confirm: ConfirmGate,
    pub submit: SubmitGuard,
}

impl UserEditScreen {
    pub fn new(user: &ManagedUser) -> Self {
        Self {
            user_id: user.id,
            edit: EditDraft::new(UserUpdate::from(user)),
            delete_confirm: ConfirmGate::new(),
            submit: SubmitGuard::new(),
        }
    }

    /// Clears transient state when the screen is navigated away from.
    pub fn leave(&mut self) {
        self.edit.cancel();
        self.delete_confirm.reset();
    }
}

/// Editable fields of the signed-in user's own profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
}

impl From<&Session> for ProfileDraft {
    fn from(session: &Session) -> Self {
        Self {
            name: session.name.clone(),
            email: session.email.clone(),
        }
    }
}

/// Local state of the profile screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileScreen {
    pub edit: EditDraft<ProfileDraft>,
    pub sign_out_confirm: ConfirmGate,
    pub submit: SubmitGuard,
}

impl ProfileScreen {
    pub fn new(session: &Session) -> Self {
        Self {
            edit: EditDraft::new(ProfileDraft::from(session)),
            sign_out_confirm: ConfirmGate::new(),
            submit: SubmitGuard::new(),
        }
    }

    pub fn leave(&mut self) {
        self.edit.cancel();
        self.sign_out_confirm.reset();
    }
}

/// Local state of a host's own event screen.
///
/// Carries the event edit draft plus two destructive-action gates: one
/// for cancelling the event, and a keyed one for removing an attendee
/// (arming records which attendee the Confirm/Cancel pair refers to).
#[derive(Debug, Clone, PartialEq)]
pub struct HostEventScreen {
    pub event_id: EventId,
    pub edit: EditDraft<EventForm>,
    pub cancel_confirm: ConfirmGate,
    pending_removal: Option<UserId>,
    pub submit: SubmitGuard,
}

impl HostEventScreen {
    pub fn new(event: &Event) -> Self {
        Self {
            event_id: event.id,
            edit: EditDraft::new(EventForm::from(event)),
            cancel_confirm: ConfirmGate::new(),
            pending_removal: None,
            submit: SubmitGuard::new(),
        }
    }

    /// The attendee the removal Confirm/Cancel pair currently refers to.
    pub fn pending_removal(&self) -> Option<UserId> {
        self.pending_removal
    }

    /// Arms removal for one attendee; re-arming switches the target.
    pub fn arm_removal(&mut self, attendee: UserId) {
        self.pending_removal = Some(attendee);
    }

    /// Confirms the armed removal, yielding the attendee to remove.
    /// Returns `None` (and removes nobody) when nothing was armed.
    pub fn confirm_removal(&mut self) -> Option<UserId> {
        self.pending_removal.take()
    }

    /// Cancels the armed removal without acting.
    pub fn cancel_removal(&mut self) {
        self.pending_removal = None;
    }

    pub fn leave(&mut self) {
        self.edit.cancel();
        self.cancel_confirm.reset();
        self.pending_removal = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use quadra_core::event::EventStatus;
    use quadra_core::session::Role;
    use std::collections::BTreeSet;

    fn user() -> ManagedUser {
        ManagedUser {
            id: 2,
            name: "B".to_string(),
            email: "b@campus.edu".to_string(),
            roles: BTreeSet::from([Role::Student, Role::Host]),
            active: true,
        }
    }

    #[test]
    fn test_edit_cycle_keeps_draft_on_failure() {
        let mut screen = UserEditScreen::new(&user());
        screen.edit.begin_edit();
        screen.edit.draft_mut().unwrap().roles.remove(&Role::Host);

        // Save round-trip failed: nothing promoted, draft intact.
        assert!(screen.edit.draft().unwrap().roles.len() == 1);
        assert!(screen.edit.saved().roles.contains(&Role::Host));

        // Save round-trip succeeded.
        screen.edit.commit();
        assert!(!screen.edit.saved().roles.contains(&Role::Host));
    }

    #[test]
    fn test_leave_clears_transient_state() {
        let mut screen = UserEditScreen::new(&user());
        screen.edit.begin_edit();
        screen.delete_confirm.arm();
        screen.leave();
        assert!(!screen.edit.is_editing());
        assert!(!screen.delete_confirm.is_armed());
    }

    fn event() -> Event {
        Event {
            id: 4,
            title: "Open Mic".to_string(),
            description: String::new(),
            category: "music".to_string(),
            location: "Quad".to_string(),
            starts_at: Utc.with_ymd_and_hms(2026, 9, 1, 18, 0, 0).unwrap(),
            capacity: Some(80),
            status: EventStatus::Published,
            host_id: 9,
        }
    }

    #[test]
    fn test_attendee_removal_confirm_is_keyed() {
        let mut screen = HostEventScreen::new(&event());
        assert_eq!(screen.confirm_removal(), None);

        screen.arm_removal(21);
        screen.arm_removal(34);
        assert_eq!(screen.pending_removal(), Some(34));
        assert_eq!(screen.confirm_removal(), Some(34));
        // Consumed: confirming again removes nobody.
        assert_eq!(screen.confirm_removal(), None);
    }

    #[test]
    fn test_cancel_removal_acts_on_nobody() {
        let mut screen = HostEventScreen::new(&event());
        screen.arm_removal(21);
        screen.cancel_removal();
        assert_eq!(screen.confirm_removal(), None);
    }

    #[test]
    fn test_event_edit_draft_seeds_from_event() {
        let mut screen = HostEventScreen::new(&event());
        screen.edit.begin_edit();
        assert_eq!(screen.edit.draft().unwrap().title, "Open Mic");
        screen.edit.draft_mut().unwrap().capacity = None;
        screen.edit.commit();
        assert_eq!(screen.edit.saved().capacity, None);
    }
}
