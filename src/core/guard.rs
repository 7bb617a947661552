//! Guard predicates and output actions attached to transitions.
//!
//! Both callbacks receive the running machine, so they can inspect the
//! current state, touch the composition context, or even overwrite the
//! state themselves.

use super::machine::Fsm;
use std::fmt;

/// Predicate that decides whether a transition may fire.
///
/// A transition without a guard is always allowed to fire.
///
/// # Example
///
/// ```rust
/// use tablefsm::core::{Fsm, Guard};
///
/// let at_rest = Guard::new(|fsm: &mut Fsm<'_>| fsm.state() == 0);
///
/// let mut fsm: Fsm<'_> = Fsm::unbound(0, ());
/// assert!(at_rest.check(&mut fsm));
///
/// fsm.set_state(3);
/// assert!(!at_rest.check(&mut fsm));
/// ```
pub struct Guard<C = ()> {
    predicate: Box<dyn Fn(&mut Fsm<'_, C>) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a predicate over the machine.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&mut Fsm<'_, C>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the predicate against the machine.
    pub fn check(&self, fsm: &mut Fsm<'_, C>) -> bool {
        (self.predicate)(fsm)
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

/// Output procedure run after a transition has updated the state.
pub struct Action<C = ()> {
    procedure: Box<dyn Fn(&mut Fsm<'_, C>) + Send + Sync>,
}

impl<C> Action<C> {
    /// Create an action from a procedure over the machine.
    pub fn new<F>(procedure: F) -> Self
    where
        F: Fn(&mut Fsm<'_, C>) + Send + Sync + 'static,
    {
        Action {
            procedure: Box::new(procedure),
        }
    }

    /// Run the procedure against the machine.
    pub fn run(&self, fsm: &mut Fsm<'_, C>) {
        (self.procedure)(fsm)
    }
}

impl<C> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}
