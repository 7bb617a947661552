//! Core state machine types and logic.
//!
//! This module contains the whole runner:
//! - Transition rows with optional guards and actions
//! - Table validation against the transition limit
//! - The [`Fsm`] itself, which fires at most one transition per call
//!
//! Tables are borrowed, never copied, and are read-only while bound.

mod error;
mod guard;
mod machine;
mod table;
mod transition;

pub use error::FsmError;
pub use guard::{Action, Guard};
pub use machine::{FireOutcome, Fsm};
pub use table::{scan, MAX_TRANSITIONS};
pub use transition::{Transition, TERMINATOR_STATE};
