//! Tablefsm: a minimal table-driven finite state machine runner
//!
//! The caller owns a static transition table and the machine borrows it.
//! Each call to [`Fsm::fire`] evaluates the guards of the current state in
//! table order and takes at most one transition, running its output action
//! afterwards.
//!
//! # Core Concepts
//!
//! - **Transition**: origin state, optional guard, destination state, optional action
//! - **Table**: ordered transitions closed by the `(-1, -1)` terminator
//! - **Fire**: one evaluation cycle, reported as a [`FireOutcome`]
//! - **Allocator**: the hook used to place machines on the heap
//!
//! # Example
//!
//! ```rust
//! use tablefsm::core::{FireOutcome, Fsm, Transition};
//!
//! let table = [
//!     Transition::new(0, 1).when(|_: &mut Fsm<'_>| true),
//!     Transition::new(1, 0).when(|_: &mut Fsm<'_>| false),
//!     Transition::end(),
//! ];
//!
//! let mut fsm = Fsm::new(Some(&table), ()).unwrap();
//! assert_eq!(fsm.state(), 0);
//!
//! assert_eq!(fsm.fire(), FireOutcome::Transitioned);
//! assert_eq!(fsm.fire(), FireOutcome::GuardsNotSatisfied);
//!
//! fsm.set_state(5);
//! assert_eq!(fsm.fire(), FireOutcome::UnknownState);
//!
//! fsm.destroy();
//! ```

pub mod alloc;
pub mod builder;
pub mod core;

// Re-export commonly used types
pub use crate::alloc::{Allocator, SystemAllocator};
pub use crate::core::{FireOutcome, Fsm, FsmError, Transition, MAX_TRANSITIONS};
