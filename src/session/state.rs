//! Two-state toggles guarding re-entrant operations.

use std::sync::{Mutex, PoisonError};

/// Whether a request is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SendState {
    #[default]
    Idle,
    AwaitingReply,
}

/// Whether speech recognition is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
}

/// A state value that can only leave its idle state through a guard.
#[derive(Debug, Default)]
pub struct StateCell<S> {
    state: Mutex<S>,
}

impl<S: Copy + Default + PartialEq> StateCell<S> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(S::default()),
        }
    }

    pub fn get(&self) -> S {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves from idle to `busy`. Returns `None` if already busy.
    ///
    /// Dropping the guard puts the cell back to idle.
    pub fn try_enter(&self, busy: S) -> Option<StateGuard<'_, S>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != S::default() {
            return None;
        }
        *state = busy;
        Some(StateGuard { cell: self })
    }

    fn reset(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = S::default();
    }
}

/// Returns its [`StateCell`] to idle when dropped.
#[must_use = "the state returns to idle as soon as the guard is dropped"]
pub struct StateGuard<'a, S: Copy + Default + PartialEq> {
    cell: &'a StateCell<S>,
}

impl<S: Copy + Default + PartialEq> Drop for StateGuard<'_, S> {
    fn drop(&mut self) {
        self.cell.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let cell = StateCell::<SendState>::new();
        assert_eq!(cell.get(), SendState::Idle);
    }

    #[test]
    fn test_enter_and_release() {
        let cell = StateCell::<SendState>::new();
        {
            let _guard = cell.try_enter(SendState::AwaitingReply);
            assert_eq!(cell.get(), SendState::AwaitingReply);
        }
        assert_eq!(cell.get(), SendState::Idle);
    }

    #[test]
    fn test_reentry_rejected_while_busy() {
        let cell = StateCell::<VoiceState>::new();
        let guard = cell.try_enter(VoiceState::Listening);
        assert!(guard.is_some());
        assert!(cell.try_enter(VoiceState::Listening).is_none());

        drop(guard);
        assert!(cell.try_enter(VoiceState::Listening).is_some());
    }
}
