//! Pluggable storage provider for heap-allocated machines.
//!
//! [`Fsm::new_in`](crate::core::Fsm::new_in) and
//! [`Fsm::destroy_in`](crate::core::Fsm::destroy_in) route their single
//! allocation and release through an [`Allocator`]. The default methods use
//! the global allocator, so hosts only override what they need, e.g. to
//! simulate exhaustion or to count calls in tests.

/// Allocation hooks used when creating and destroying machines.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use tablefsm::alloc::Allocator;
///
/// #[derive(Default)]
/// struct Counting {
///     allocations: AtomicUsize,
/// }
///
/// impl Allocator for Counting {
///     fn allocate<T>(&self, value: T) -> Option<Box<T>> {
///         self.allocations.fetch_add(1, Ordering::SeqCst);
///         Some(Box::new(value))
///     }
/// }
///
/// let counting = Counting::default();
/// let boxed = counting.allocate(7u8);
/// assert_eq!(boxed.as_deref(), Some(&7));
/// assert_eq!(counting.allocations.load(Ordering::SeqCst), 1);
/// ```
pub trait Allocator {
    /// Move `value` into fresh heap storage, or return `None` on failure.
    ///
    /// On failure `value` is dropped.
    fn allocate<T>(&self, value: T) -> Option<Box<T>> {
        Some(Box::new(value))
    }

    /// Give back storage obtained from [`Allocator::allocate`].
    fn release<T>(&self, boxed: Box<T>) {
        drop(boxed);
    }
}

/// The global allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemAllocator;

impl Allocator for SystemAllocator {}
