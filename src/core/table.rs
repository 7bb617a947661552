//! Transition table validation.

use super::error::FsmError;
use super::transition::Transition;
use tracing::trace;

/// Maximum number of transitions a table may hold, terminator excluded.
pub const MAX_TRANSITIONS: usize = 128;

/// Walk a table up to its terminator and count the transitions before it.
///
/// The walk stops at whichever comes first: the terminator, more than
/// [`MAX_TRANSITIONS`] entries, or the end of the slice.
///
/// # Example
///
/// ```rust
/// use tablefsm::core::{scan, Transition};
///
/// let table: [Transition; 3] = [Transition::new(0, 1), Transition::new(1, 0), Transition::end()];
/// assert_eq!(scan(&table), Ok(2));
///
/// let unterminated: [Transition; 1] = [Transition::new(0, 1)];
/// assert!(scan(&unterminated).is_err());
/// ```
pub fn scan<C>(table: &[Transition<C>]) -> Result<usize, FsmError> {
    for (count, transition) in table.iter().enumerate() {
        if transition.is_terminator() {
            trace!(transitions = count, "transition table scanned");
            return Ok(count);
        }
        if count >= MAX_TRANSITIONS {
            return Err(FsmError::TooManyTransitions {
                limit: MAX_TRANSITIONS,
            });
        }
    }

    Err(FsmError::MissingTerminator {
        scanned: table.len(),
    })
}
