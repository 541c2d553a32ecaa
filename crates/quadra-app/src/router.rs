//! The screen router.
//!
//! One mutable active screen plus a single remembered previous screen.
//! There is deliberately no navigation stack: back from anywhere is at
//! most one level deep, matching how the screens actually link.

use quadra_core::error::{QuadraError, Result};
use quadra_core::screen::Screen;
use quadra_core::session::Session;

/// Owns which screen is active and the depth-1 back slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRouter {
    active: Screen,
    previous: Option<Screen>,
}

impl ViewRouter {
    /// Starts on the login screen with no back history.
    pub fn new() -> Self {
        Self {
            active: Screen::Login,
            previous: None,
        }
    }

    pub fn active(&self) -> &Screen {
        &self.active
    }

    /// Whether a back control should be rendered.
    pub fn can_go_back(&self) -> bool {
        self.previous.is_some()
    }

    /// Forward navigation to `screen`.
    ///
    /// Rules:
    /// - re-showing the active screen is a no-op;
    /// - a screen that requires a session is rejected while anonymous;
    /// - navigating to Login clears the back slot (there is nothing to
    ///   go back to once signed out);
    /// - any other transition records the prior screen in the back slot.
    pub fn show(&mut self, screen: Screen, session: Option<&Session>) -> Result<&Screen> {
        if screen == self.active {
            return Ok(&self.active);
        }
        if screen.requires_session() && session.is_none() {
            return Err(QuadraError::unauthorized(format!(
                "sign in to open {}",
                screen.name()
            )));
        }

        tracing::debug!(from = self.active.name(), to = screen.name(), "screen change");
        if screen == Screen::Login {
            self.previous = None;
            self.active = screen;
        } else {
            self.previous = Some(std::mem::replace(&mut self.active, screen));
        }
        Ok(&self.active)
    }

    /// Pops to the remembered previous screen.
    ///
    /// Fails with [`QuadraError::NoPreviousScreen`] when the slot is
    /// empty; callers guard by hiding the back control via
    /// [`ViewRouter::can_go_back`]. The slot is consumed: a second
    /// consecutive call fails rather than walking further back.
    pub fn go_back(&mut self) -> Result<&Screen> {
        let previous = self.previous.take().ok_or(QuadraError::NoPreviousScreen)?;
        tracing::debug!(from = self.active.name(), to = previous.name(), "back navigation");
        self.active = previous;
        Ok(&self.active)
    }

    /// Hard reset to the login screen, clearing the back slot.
    ///
    /// Used on sign-out and forced logout; never fails.
    pub fn reset_to_login(&mut self) {
        tracing::debug!(from = self.active.name(), "reset to login");
        self.active = Screen::Login;
        self.previous = None;
    }
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}
