//! Builder API for assembling transition tables.
//!
//! Tables can always be written by hand as a slice closed by
//! [`Transition::end`]. The builder produces the same thing from a fluent
//! API, appends the terminator itself and rejects tables that
//! [`Fsm::new`](crate::core::Fsm::new) would refuse.

pub mod error;

pub use error::BuildError;

use crate::core::{Fsm, Transition, MAX_TRANSITIONS};

/// Fluent builder for an owned, terminated transition table.
///
/// # Example
///
/// ```
/// use tablefsm::builder::TableBuilder;
/// use tablefsm::core::{FireOutcome, Fsm};
///
/// let table = TableBuilder::new()
///     .guarded(0, 1, |fsm: &mut Fsm<'_>| fsm.state() == 0)
///     .add(1, 0)
///     .build()
///     .unwrap();
///
/// let mut fsm = Fsm::new(Some(&table), ()).unwrap();
/// assert_eq!(fsm.fire(), FireOutcome::Transitioned);
/// assert_eq!(fsm.state(), 1);
/// fsm.destroy();
/// ```
pub struct TableBuilder<C = ()> {
    transitions: Vec<Transition<C>>,
}

impl<C> TableBuilder<C> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a pre-built transition.
    pub fn transition(mut self, transition: Transition<C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Append an unguarded transition without action.
    pub fn add(self, origin: i32, destination: i32) -> Self {
        self.transition(Transition::new(origin, destination))
    }

    /// Append a guarded transition without action.
    pub fn guarded<F>(self, origin: i32, destination: i32, guard: F) -> Self
    where
        F: Fn(&mut Fsm<'_, C>) -> bool + Send + Sync + 'static,
    {
        self.transition(Transition::new(origin, destination).when(guard))
    }

    /// Validate and return the table with the terminator appended.
    pub fn build(self) -> Result<Vec<Transition<C>>, BuildError> {
        let first = self.transitions.first().ok_or(BuildError::NoTransitions)?;
        if first.guard.is_none() {
            return Err(BuildError::UnguardedFirstTransition);
        }

        if self.transitions.len() > MAX_TRANSITIONS {
            return Err(BuildError::TooManyTransitions {
                count: self.transitions.len(),
                limit: MAX_TRANSITIONS,
            });
        }

        for transition in &self.transitions {
            for state in [transition.origin, transition.destination] {
                if state < 0 {
                    return Err(BuildError::NegativeState { state });
                }
            }
        }

        let mut table = self.transitions;
        table.push(Transition::end());
        Ok(table)
    }
}

impl<C> Default for TableBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
