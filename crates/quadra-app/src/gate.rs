//! The role gate: where does this session land after authentication?

use quadra_core::screen::Screen;
use quadra_core::session::{Role, Session};

/// Picks the landing screen for a session.
///
/// Pure: same session in, same screen out. Admin membership wins over
/// Host; everyone else (including a session with no granted roles)
/// lands on the event listing. Evaluated once per successful
/// login/registration and once at startup after restore.
pub fn initial_screen_for(session: Option<&Session>) -> Screen {
    match session {
        None => Screen::Login,
        Some(session) if session.has_role(Role::Admin) => Screen::admin_home(),
        Some(session) if session.has_role(Role::Host) => Screen::host_home(),
        Some(_) => Screen::EventListing,
    }
}
