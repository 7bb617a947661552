//! Build errors for the transition table builder.

use thiserror::Error;

/// Errors that can occur when assembling a transition table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("State {state} is negative; negative states are reserved for the terminator")]
    NegativeState { state: i32 },

    #[error("First transition has no guard. Call .when(predicate) on it")]
    UnguardedFirstTransition,

    #[error("{count} transitions exceed the limit of {limit}")]
    TooManyTransitions { count: usize, limit: usize },
}
