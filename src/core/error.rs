//! Errors raised while creating a machine.

use thiserror::Error;

/// Reasons [`Fsm::new`](super::Fsm::new) refuses to create a machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    /// No table was passed in
    #[error("No transition table given")]
    MissingTable,

    /// First row is missing, uses the terminator state or has no guard
    #[error("First transition is empty or malformed (terminator state or missing guard)")]
    MalformedFirstTransition,

    /// More rows than [`MAX_TRANSITIONS`](super::MAX_TRANSITIONS) before the terminator
    #[error("Transition table exceeds the limit of {limit} transitions")]
    TooManyTransitions { limit: usize },

    /// Slice ended without a terminator row
    #[error("Transition table has no terminator after {scanned} transitions")]
    MissingTerminator { scanned: usize },

    /// The allocator returned no storage
    #[error("Allocator could not provide storage for the machine")]
    AllocationFailed,
}
