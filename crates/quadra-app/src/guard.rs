//! Stale-response guarding.
//!
//! Screens stay interactive while a request is in flight, and the user
//! may navigate away before it settles. A response that arrives for a
//! screen that is no longer mounted must not be applied. Each mount
//! takes a token; navigation bumps the generation, and the token then
//! reports itself stale.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation counter owned by the navigation layer.
#[derive(Debug, Clone, Default)]
pub struct ResponseGuard {
    generation: Arc<AtomicU64>,
}

impl ResponseGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a token bound to the current generation. Taken when a
    /// screen kicks off a request.
    pub fn issue(&self) -> ResponseToken {
        ResponseToken {
            seen: self.generation.load(Ordering::Acquire),
            generation: Arc::clone(&self.generation),
        }
    }

    /// Invalidates every outstanding token. Called on navigation.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

/// Handed to the completion path of one request.
#[derive(Debug, Clone)]
pub struct ResponseToken {
    seen: u64,
    generation: Arc<AtomicU64>,
}

impl ResponseToken {
    /// Whether the response may still be applied.
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::Acquire) == self.seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_current_until_invalidated() {
        let guard = ResponseGuard::new();
        let token = guard.issue();
        assert!(token.is_current());
        guard.invalidate();
        assert!(!token.is_current());
    }

    #[test]
    fn test_fresh_token_after_invalidation() {
        let guard = ResponseGuard::new();
        guard.invalidate();
        let token = guard.issue();
        assert!(token.is_current());
    }

    #[test]
    fn test_tokens_are_independent() {
        let guard = ResponseGuard::new();
        let stale = guard.issue();
        guard.invalidate();
        let fresh = guard.issue();
        assert!(!stale.is_current());
        assert!(fresh.is_current());
    }
}
