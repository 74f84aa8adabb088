use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{AppError, AppResult};

/// Cancellable, optionally deadline-bound handle passed to stack mutations and
/// collaborator fetches.
///
/// Clones share the cancel flag, so cancelling any clone expires all of them.
#[derive(Debug, Clone)]
pub struct FetchContext {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl FetchContext {
    pub fn background() -> Self {
        Self {
            deadline: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_expired(&self) -> bool {
        if self.cancelled.load(Ordering::Acquire) {
            return true;
        }
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Time left before the deadline; `None` for contexts without one.
    pub fn remaining(&self) -> Option<Duration> {
        if self.cancelled.load(Ordering::Acquire) {
            return Some(Duration::ZERO);
        }
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn check(&self, operation: &'static str) -> AppResult<()> {
        if self.is_expired() {
            return Err(AppError::context_expired(operation));
        }
        Ok(())
    }
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::background()
    }
}
