//! Transition table entries.

use super::guard::{Action, Guard};
use super::machine::Fsm;

/// State value reserved for the table terminator.
pub const TERMINATOR_STATE: i32 = -1;

/// One row of a transition table.
///
/// A table is an ordered slice of transitions closed by [`Transition::end`].
/// For a given origin state the first row whose guard is satisfied wins.
///
/// # Example
///
/// ```rust
/// use tablefsm::core::{Fsm, Transition};
///
/// let table = [
///     Transition::new(0, 1).when(|_: &mut Fsm<'_>| true),
///     Transition::new(1, 0),
///     Transition::end(),
/// ];
///
/// assert!(table[2].is_terminator());
/// assert!(!table[0].is_terminator());
/// ```
#[derive(Debug)]
pub struct Transition<C = ()> {
    pub origin: i32,
    pub guard: Option<Guard<C>>,
    pub destination: i32,
    pub action: Option<Action<C>>,
}

impl<C> Transition<C> {
    /// Unguarded transition with no action.
    pub fn new(origin: i32, destination: i32) -> Self {
        Self {
            origin,
            guard: None,
            destination,
            action: None,
        }
    }

    /// The table terminator: `-1` to `-1`, no guard, no action.
    pub fn end() -> Self {
        Self::new(TERMINATOR_STATE, TERMINATOR_STATE)
    }

    /// Attach a pre-built guard.
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Attach a guard predicate.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&mut Fsm<'_, C>) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Attach an output action.
    pub fn then<F>(mut self, procedure: F) -> Self
    where
        F: Fn(&mut Fsm<'_, C>) + Send + Sync + 'static,
    {
        self.action = Some(Action::new(procedure));
        self
    }

    pub fn is_terminator(&self) -> bool {
        self.origin == TERMINATOR_STATE && self.destination == TERMINATOR_STATE
    }

    /// Whether this row may fire from the machine's current state.
    ///
    /// A missing guard counts as satisfied. The guard is only evaluated
    /// when the origin matches.
    pub fn can_fire(&self, fsm: &mut Fsm<'_, C>) -> bool {
        if fsm.state() != self.origin {
            return false;
        }

        self.guard.as_ref().is_none_or(|g| g.check(fsm))
    }
}
