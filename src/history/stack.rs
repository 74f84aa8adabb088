use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};

use crate::bus::NotificationBus;
use crate::context::FetchContext;
use crate::error::AppResult;
use crate::event::Transition;
use crate::state::SessionState;

/// Result of a [`StateStack::pop_state`] call that passed the context check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcome {
    /// The top entry was removed; carries the new top.
    Popped(Arc<SessionState>),
    /// Only one entry was left. Nothing changed and no observer was notified.
    AtRoot(Arc<SessionState>),
    /// The stack had never been pushed.
    Empty,
}

impl PopOutcome {
    pub fn current(&self) -> Option<&Arc<SessionState>> {
        match self {
            Self::Popped(state) | Self::AtRoot(state) => Some(state),
            Self::Empty => None,
        }
    }

    pub fn popped(&self) -> bool {
        matches!(self, Self::Popped(_))
    }
}

/// Bounded history of session states, oldest first.
///
/// Pushing beyond `max_history` evicts the oldest entry. Mutations are
/// serialized by one write lock; observers are notified after the lock is
/// released but before the mutating call returns, so a synchronous observer
/// can read the stack (or push onto it) without deadlocking.
///
/// Assumes a single mutating thread, the router's event loop. Under that
/// assumption synchronous observers see transitions in mutation order. Two
/// threads mutating at once may have their notifications interleaved.
pub struct StateStack {
    entries: RwLock<VecDeque<Arc<SessionState>>>,
    max_history: usize,
    bus: NotificationBus,
}

impl StateStack {
    pub fn new(max_history: usize) -> AppResult<Self> {
        Ok(Self::with_bus(max_history, NotificationBus::new()?))
    }

    pub fn with_bus(max_history: usize, bus: NotificationBus) -> Self {
        let max_history = max_history.max(1);
        Self {
            entries: RwLock::new(VecDeque::with_capacity(max_history)),
            max_history,
            bus,
        }
    }

    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    pub fn push_state(
        &self,
        ctx: &FetchContext,
        state: impl Into<Arc<SessionState>>,
    ) -> AppResult<()> {
        ctx.check("push")?;
        let state = state.into();

        let transition = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            let old = entries.back().cloned().unwrap_or_else(|| Arc::clone(&state));
            entries.push_back(Arc::clone(&state));
            if entries.len() > self.max_history {
                entries.pop_front();
            }
            Transition::push(old, state)
        };

        tracing::debug!(from = %transition.from, to = %transition.to, "push state");
        self.bus.publish(&transition);
        Ok(())
    }

    pub fn pop_state(&self, ctx: &FetchContext) -> AppResult<PopOutcome> {
        ctx.check("pop")?;

        let transition = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            match entries.len() {
                0 => return Ok(PopOutcome::Empty),
                1 => {
                    return Ok(entries
                        .back()
                        .cloned()
                        .map_or(PopOutcome::Empty, PopOutcome::AtRoot));
                }
                _ => {}
            }
            let Some(removed) = entries.pop_back() else {
                return Ok(PopOutcome::Empty);
            };
            let Some(previous) = entries.back().cloned() else {
                return Ok(PopOutcome::Empty);
            };
            Transition::pop(removed, previous)
        };

        tracing::debug!(from = %transition.from, to = %transition.to, "pop state");
        self.bus.publish(&transition);
        Ok(PopOutcome::Popped(transition.to))
    }

    /// Swaps the top entry for `state` without notifying observers.
    ///
    /// Used to record bookkeeping such as the selected row before navigating
    /// away, so that popping back restores it. Returns `false` on an empty
    /// stack.
    pub fn replace_current(
        &self,
        ctx: &FetchContext,
        state: impl Into<Arc<SessionState>>,
    ) -> AppResult<bool> {
        ctx.check("replace")?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let Some(top) = entries.back_mut() else {
            return Ok(false);
        };
        *top = state.into();
        Ok(true)
    }

    /// Fires a `from == to` transition for input handled entirely by the
    /// presentation. Returns `false` on an empty stack.
    pub fn notify_unchanged(&self) -> bool {
        let Some(current) = self.current() else {
            return false;
        };
        self.bus.publish(&Transition::unchanged(current));
        true
    }

    pub fn current(&self) -> Option<Arc<SessionState>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .back()
            .cloned()
    }

    pub fn history(&self) -> Vec<Arc<SessionState>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
