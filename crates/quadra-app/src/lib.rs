//! Application layer for the Quadra client.
//!
//! Owns the process-wide state a UI shell drives: the session service
//! with write-through persistence, the screen router, the role gate,
//! and the stale-response guard, all sequenced by [`AppController`].

pub mod controller;
pub mod gate;
pub mod gateway;
pub mod guard;
pub mod router;
pub mod screens;
pub mod session_service;

pub use controller::AppController;
pub use gate::initial_screen_for;
pub use gateway::ApiGateway;
pub use guard::{ResponseGuard, ResponseToken};
pub use router::ViewRouter;
pub use session_service::SessionService;
