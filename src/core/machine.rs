//! The table-driven state machine runner.

use super::error::FsmError;
use super::table;
use super::transition::{Transition, TERMINATOR_STATE};
use crate::alloc::{Allocator, SystemAllocator};
use tracing::{debug, trace};

/// Result of one [`Fsm::fire`] cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FireOutcome {
    /// A guard was satisfied and the state changed.
    Transitioned,

    /// The current state has transitions, but none of their guards held.
    GuardsNotSatisfied,

    /// No transition in the table starts from the current state.
    UnknownState,
}

impl FireOutcome {
    /// Numeric encoding: `1`, `0` and `-1` respectively.
    pub fn code(self) -> i32 {
        match self {
            Self::Transitioned => 1,
            Self::GuardsNotSatisfied => 0,
            Self::UnknownState => -1,
        }
    }
}

impl From<FireOutcome> for i32 {
    fn from(outcome: FireOutcome) -> Self {
        outcome.code()
    }
}

/// Finite state machine bound to a caller-owned transition table.
///
/// The machine borrows its table for `'t` and never copies it. `C` is an
/// arbitrary context that guards and actions can reach through
/// [`Fsm::context`] and [`Fsm::context_mut`], which is how the machine is
/// composed into larger types.
///
/// # Example
///
/// ```rust
/// use tablefsm::core::{FireOutcome, Fsm, Transition};
///
/// let table = [
///     Transition::new(0, 1).when(|fsm: &mut Fsm<'_, u32>| *fsm.context() > 2),
///     Transition::new(1, 0).then(|fsm: &mut Fsm<'_, u32>| *fsm.context_mut() = 0),
///     Transition::end(),
/// ];
///
/// let mut fsm = Fsm::new(Some(&table), 0u32).unwrap();
/// assert_eq!(fsm.fire(), FireOutcome::GuardsNotSatisfied);
///
/// *fsm.context_mut() = 3;
/// assert_eq!(fsm.fire(), FireOutcome::Transitioned);
/// assert_eq!(fsm.state(), 1);
///
/// assert_eq!(fsm.fire(), FireOutcome::Transitioned);
/// assert_eq!(*fsm.context(), 0);
/// fsm.destroy();
/// ```
#[derive(Debug)]
pub struct Fsm<'t, C = ()> {
    table: Option<&'t [Transition<C>]>,
    current_state: i32,
    context: C,
}

impl<'t, C> Fsm<'t, C> {
    /// Create a heap-allocated machine using the global allocator.
    ///
    /// See [`Fsm::new_in`].
    pub fn new(table: Option<&'t [Transition<C>]>, context: C) -> Result<Box<Self>, FsmError> {
        Self::new_in(table, context, &SystemAllocator)
    }

    /// Validate `table` and create a machine in storage from `allocator`.
    ///
    /// Fails without allocating when the table is absent, when its first
    /// row has a terminator origin or destination or no guard, or when the
    /// table is oversized or unterminated. Fails after the single
    /// allocation attempt if the allocator returns nothing.
    ///
    /// The new machine starts in the first row's origin state.
    pub fn new_in<A: Allocator>(
        table: Option<&'t [Transition<C>]>,
        context: C,
        allocator: &A,
    ) -> Result<Box<Self>, FsmError> {
        let result = Self::validate(table).and_then(|table| {
            let mut fsm = allocator
                .allocate(Self::unbound(TERMINATOR_STATE, context))
                .ok_or(FsmError::AllocationFailed)?;
            fsm.bind(Some(table));
            Ok(fsm)
        });

        if let Err(err) = &result {
            debug!(error = %err, "state machine creation failed");
        }
        result
    }

    fn validate(table: Option<&'t [Transition<C>]>) -> Result<&'t [Transition<C>], FsmError> {
        let table = table.ok_or(FsmError::MissingTable)?;
        let first = table.first().ok_or(FsmError::MalformedFirstTransition)?;

        if first.origin == TERMINATOR_STATE
            || first.guard.is_none()
            || first.destination == TERMINATOR_STATE
        {
            return Err(FsmError::MalformedFirstTransition);
        }

        table::scan(table)?;
        Ok(table)
    }

    /// Release a machine created with [`Fsm::new`].
    pub fn destroy(self: Box<Self>) {
        self.destroy_in(&SystemAllocator);
    }

    /// Release a machine through the allocator it was created with.
    pub fn destroy_in<A: Allocator>(self: Box<Self>, allocator: &A) {
        allocator.release(self);
    }

    /// A machine in caller storage with no table bound yet.
    ///
    /// Use [`Fsm::bind`] to attach a table.
    pub fn unbound(state: i32, context: C) -> Self {
        Self {
            table: None,
            current_state: state,
            context,
        }
    }

    /// Bind `table` and reset the state to its first row's origin.
    ///
    /// Returns the number of transitions before the terminator, or `0`
    /// when the table is absent or fails validation. An absent table leaves
    /// both the bound table and the current state untouched.
    pub fn bind(&mut self, table: Option<&'t [Transition<C>]>) -> usize {
        let Some(table) = table else {
            trace!("bind called without a transition table");
            return 0;
        };

        match table::scan(table) {
            Ok(count) => {
                self.table = Some(table);
                if let Some(first) = table.first() {
                    self.current_state = first.origin;
                }
                debug!(
                    transitions = count,
                    initial_state = self.current_state,
                    "transition table bound"
                );
                count
            }
            Err(err) => {
                debug!(error = %err, "transition table rejected");
                0
            }
        }
    }

    /// The bound table, if any.
    pub fn table(&self) -> Option<&'t [Transition<C>]> {
        self.table
    }

    /// The current state, as last set by a transition, `bind` or `set_state`.
    pub fn state(&self) -> i32 {
        self.current_state
    }

    /// Overwrite the current state without checking it against the table.
    pub fn set_state(&mut self, state: i32) {
        self.current_state = state;
    }

    /// Shared access to the composition context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Exclusive access to the composition context.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Attempt at most one transition from the current state.
    ///
    /// Rows are visited in table order up to the first row with a negative
    /// origin. For every row leaving the current state the guard is
    /// evaluated; the first satisfied one moves the machine to its
    /// destination and then runs its action.
    pub fn fire(&mut self) -> FireOutcome {
        let Some(table) = self.table else {
            return FireOutcome::UnknownState;
        };

        let mut found = false;
        for transition in table.iter().take_while(|t| t.origin >= 0) {
            if transition.origin != self.current_state {
                continue;
            }
            found = true;

            if transition.can_fire(self) {
                let from = self.current_state;
                self.current_state = transition.destination;
                if let Some(action) = &transition.action {
                    action.run(self);
                }
                debug!(from, to = transition.destination, "transition fired");
                return FireOutcome::Transitioned;
            }
        }

        if found {
            trace!(state = self.current_state, "no guard satisfied");
            FireOutcome::GuardsNotSatisfied
        } else {
            trace!(state = self.current_state, "state not found in table");
            FireOutcome::UnknownState
        }
    }
}

/// An unbound machine in state `0` with a default context.
///
/// Equivalent to `Fsm::unbound(0, C::default())`.
impl<'t, C: Default> Default for Fsm<'t, C> {
    fn default() -> Self {
        Self::unbound(0, C::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (Arc::clone(&calls), calls)
    }

    #[test]
    fn fire_outcome_codes() {
        assert_eq!(FireOutcome::Transitioned.code(), 1);
        assert_eq!(FireOutcome::GuardsNotSatisfied.code(), 0);
        assert_eq!(i32::from(FireOutcome::UnknownState), -1);
    }

    #[test]
    fn default_is_unbound_in_state_zero() {
        let fsm: Fsm<'_, u8> = Fsm::default();

        assert!(fsm.table().is_none());
        assert_eq!(fsm.state(), 0);
        assert_eq!(*fsm.context(), 0);
    }

    #[test]
    fn bind_sets_initial_state_and_counts() {
        let table: Vec<Transition> = vec![
            Transition::new(3, 4),
            Transition::new(4, 3),
            Transition::end(),
        ];
        let mut fsm: Fsm<'_> = Fsm::unbound(99, ());

        assert_eq!(fsm.bind(Some(&table)), 2);
        assert_eq!(fsm.state(), 3);
        assert!(fsm.table().is_some());
    }

    #[test]
    fn bind_without_table_keeps_storage_untouched() {
        let mut fsm: Fsm<'_> = Fsm::unbound(17, ());

        assert_eq!(fsm.bind(None), 0);
        assert!(fsm.table().is_none());
        assert_eq!(fsm.state(), 17);
    }

    #[test]
    fn bind_without_table_keeps_previous_binding() {
        let table: Vec<Transition> = vec![Transition::new(2, 3), Transition::end()];
        let mut fsm: Fsm<'_> = Fsm::default();
        fsm.bind(Some(&table));
        fsm.set_state(3);

        assert_eq!(fsm.bind(None), 0);
        assert!(fsm.table().is_some());
        assert_eq!(fsm.state(), 3);
    }

    #[test]
    fn rebind_resets_state() {
        let first: Vec<Transition> = vec![Transition::new(0, 1), Transition::end()];
        let second: Vec<Transition> = vec![Transition::new(10, 11), Transition::end()];
        let mut fsm: Fsm<'_> = Fsm::default();

        fsm.bind(Some(&first));
        assert_eq!(fsm.fire(), FireOutcome::Transitioned);
        assert_eq!(fsm.bind(Some(&second)), 1);
        assert_eq!(fsm.state(), 10);
    }

    #[test]
    fn oversized_table_is_not_bound() {
        let mut table: Vec<Transition> = (0..=table::MAX_TRANSITIONS as i32)
            .map(|i| Transition::new(i, i + 1))
            .collect();
        table.push(Transition::end());
        let mut fsm: Fsm<'_> = Fsm::unbound(5, ());

        assert_eq!(fsm.bind(Some(&table)), 0);
        assert!(fsm.table().is_none());
        assert_eq!(fsm.state(), 5);
    }

    #[test]
    fn fire_on_unbound_machine_reports_unknown_state() {
        let mut fsm: Fsm<'_> = Fsm::default();

        assert_eq!(fsm.fire(), FireOutcome::UnknownState);
        assert_eq!(fsm.state(), 0);
    }

    #[test]
    fn first_satisfied_guard_wins() {
        let table: Vec<Transition> = vec![
            Transition::new(0, 1).when(|_| false),
            Transition::new(0, 2).when(|_| true),
            Transition::new(0, 3).when(|_| true),
            Transition::end(),
        ];
        let mut fsm: Fsm<'_> = Fsm::default();
        fsm.bind(Some(&table));

        assert_eq!(fsm.fire(), FireOutcome::Transitioned);
        assert_eq!(fsm.state(), 2);
    }

    #[test]
    fn later_rows_are_skipped_after_a_transition() {
        let (probe, calls) = counter();
        let table: Vec<Transition> = vec![
            Transition::new(0, 1),
            Transition::new(0, 2).when(move |_| {
                probe.fetch_add(1, Ordering::SeqCst);
                true
            }),
            Transition::end(),
        ];
        let mut fsm: Fsm<'_> = Fsm::default();
        fsm.bind(Some(&table));

        fsm.fire();
        assert_eq!(fsm.state(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn all_guards_blocked_reports_not_satisfied() {
        let table: Vec<Transition> = vec![
            Transition::new(0, 1).when(|_| false),
            Transition::new(0, 2).when(|_| false),
            Transition::end(),
        ];
        let mut fsm: Fsm<'_> = Fsm::default();
        fsm.bind(Some(&table));

        assert_eq!(fsm.fire(), FireOutcome::GuardsNotSatisfied);
        assert_eq!(fsm.state(), 0);
    }

    #[test]
    fn destination_without_rows_is_unknown_state() {
        let table: Vec<Transition> = vec![Transition::new(0, 1), Transition::end()];
        let mut fsm: Fsm<'_> = Fsm::default();
        fsm.bind(Some(&table));

        assert_eq!(fsm.fire(), FireOutcome::Transitioned);
        assert_eq!(fsm.fire(), FireOutcome::UnknownState);
        assert_eq!(fsm.state(), 1);
    }

    #[test]
    fn action_runs_after_state_change() {
        let seen = Arc::new(std::sync::atomic::AtomicI32::new(-100));
        let probe = Arc::clone(&seen);
        let table: Vec<Transition> = vec![
            Transition::new(0, 1).then(move |fsm| probe.store(fsm.state(), Ordering::SeqCst)),
            Transition::end(),
        ];
        let mut fsm: Fsm<'_> = Fsm::default();
        fsm.bind(Some(&table));

        fsm.fire();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn action_may_override_destination() {
        let table: Vec<Transition> = vec![
            Transition::new(0, 1).then(|fsm| fsm.set_state(7)),
            Transition::end(),
        ];
        let mut fsm: Fsm<'_> = Fsm::default();
        fsm.bind(Some(&table));

        assert_eq!(fsm.fire(), FireOutcome::Transitioned);
        assert_eq!(fsm.state(), 7);
    }

    #[test]
    fn guard_state_write_is_overwritten_by_destination() {
        let table: Vec<Transition> = vec![
            Transition::new(0, 1).when(|fsm| {
                fsm.set_state(9);
                true
            }),
            Transition::end(),
        ];
        let mut fsm: Fsm<'_> = Fsm::default();
        fsm.bind(Some(&table));

        fsm.fire();
        assert_eq!(fsm.state(), 1);
    }

    #[test]
    fn fire_stops_at_negative_origin() {
        let table: Vec<Transition> = vec![
            Transition::new(0, 1).when(|_| false),
            Transition::new(-2, 0),
            Transition::new(0, 5),
            Transition::end(),
        ];
        let mut fsm: Fsm<'_> = Fsm::default();
        fsm.bind(Some(&table));

        assert_eq!(fsm.fire(), FireOutcome::GuardsNotSatisfied);
        assert_eq!(fsm.state(), 0);
    }

    #[test]
    fn context_is_shared_with_callbacks() {
        let table: Vec<Transition<Vec<i32>>> = vec![
            Transition::new(0, 1).then(|fsm: &mut Fsm<'_, Vec<i32>>| {
                let state = fsm.state();
                fsm.context_mut().push(state);
            }),
            Transition::new(1, 0).then(|fsm: &mut Fsm<'_, Vec<i32>>| {
                let state = fsm.state();
                fsm.context_mut().push(state);
            }),
            Transition::end(),
        ];
        let mut fsm = Fsm::unbound(0, Vec::new());
        fsm.bind(Some(&table));

        fsm.fire();
        fsm.fire();
        fsm.fire();
        assert_eq!(fsm.context(), &vec![1, 0, 1]);
    }
}
