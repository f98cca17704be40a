//! Cooperative cancellation.
//!
//! A [`CancellationToken`] is the only thing the caller's execution context
//! contributes to a scaffold call: "stop" and "stop after this instant".
//! Clones share state, so cancelling any clone cancels all of them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Why a token reports itself as done.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Cancelled {
    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// A token that is only done once [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that also expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::default(),
            deadline: Some(deadline),
        }
    }

    /// A token that also expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// `Ok(())` while work may proceed. Explicit cancellation wins over an
    /// elapsed deadline.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.cancelled.load(Ordering::Acquire) {
            return Err(Cancelled::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Cancelled::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_live() {
        let token = CancellationToken::new();
        assert!(token.check().is_ok());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert_eq!(token.check(), Err(Cancelled::Cancelled));
    }

    #[test]
    fn cancel_is_idempotent() {
        let token = CancellationToken::new();
        token.cancel();
        token.cancel();
        assert_eq!(token.check(), Err(Cancelled::Cancelled));
    }

    #[test]
    fn elapsed_deadline_reports_exceeded() {
        let token = CancellationToken::with_deadline(Instant::now());
        assert_eq!(token.check(), Err(Cancelled::DeadlineExceeded));
    }

    #[test]
    fn future_deadline_is_live() {
        let token = CancellationToken::with_timeout(Duration::from_secs(3600));
        assert!(token.check().is_ok());
    }

    #[test]
    fn explicit_cancel_wins_over_deadline() {
        let token = CancellationToken::with_deadline(Instant::now());
        token.cancel();
        assert_eq!(token.check(), Err(Cancelled::Cancelled));
    }
}
