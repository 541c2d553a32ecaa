//! Reusable per-screen interaction state machines.
//!
//! Every screen with a destructive action, an edit mode, or a submit
//! button composes these instead of reinventing local flags.

pub mod confirm;
pub mod draft;
pub mod submit;

pub use confirm::ConfirmGate;
pub use draft::EditDraft;
pub use submit::SubmitGuard;
