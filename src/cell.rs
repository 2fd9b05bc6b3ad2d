// This file is part of tracked-cell.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `TrackedCell` type and its inherent API.
//!
//! `TrackedCell<T, A>` owns a value, two plain counters behind `Cell`s, and
//! a possibly-empty [`LogSink`] behind a `RefCell`. All bookkeeping is
//! single-threaded interior mutability; the type is `!Sync` by
//! construction and makes no concurrency guarantees.
//!
//! No operation here fails at runtime.

// Crate imports
use crate::{guard::AccessGuard, sink::LogSink};

// Core imports
use core::{
    cell::{Cell, RefCell},
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

/// A value wrapper that counts access episodes and batches them into sink
/// reports.
///
/// `TrackedCell<T, A>` exclusively owns a payload of type `T`. Access goes
/// through [`access`](TrackedCell::access), which returns an
/// [`AccessGuard`] and bumps two counters:
///
/// - the **access count** — episodes since the last report;
/// - the **outstanding count** — guards currently alive.
///
/// Dropping the last outstanding guard invokes the sink once with the
/// access count accumulated since the previous report, then resets that
/// count to zero. The cell may drain to zero and refill arbitrarily many
/// times over its life.
///
/// # State machine
///
/// With state `(outstanding, access)`:
///
/// - initial: `(0, 0)`;
/// - `access()`: `(o, a) → (o + 1, a + 1)`;
/// - guard drop, `o > 1`: `(o, a) → (o - 1, a)`, no report;
/// - guard drop, `o == 1`: sink invoked with `a`, then `(1, a) → (0, 0)`.
///
/// Guards are minted only by `access()`, are not clonable, and release
/// exactly once on drop, so releases can never outnumber accesses.
///
/// # What does *not* count
///
/// - [`peek`](TrackedCell::peek) and [`peek_mut`](TrackedCell::peek_mut)
///   return plain references and leave both counters untouched.
/// - Dereferencing one guard many times counts as the single episode that
///   created it.
/// - Comparison, hashing, and `Debug` delegate to the payload; counters and
///   sink never participate.
///
/// # Clone semantics
///
/// Cloning (requires `T: Clone`) clones the payload and the allocator
/// handle, duplicates the sink per [`LogSink`]'s rule — a non-duplicable
/// sink becomes **empty** in the clone, silently — and zeroes both
/// counters. A clone is a fresh accounting domain: driving it to a report
/// never touches the original's sink, and vice versa.
///
/// Moving a cell transfers everything; the moved-from binding is
/// statically unusable, so no accounting can continue through it.
///
/// # The allocator handle
///
/// The `A` parameter (default `()`) is an injectable allocator-like handle
/// carried for parity with allocating wrappers: it is stored, exposed via
/// [`allocator`](TrackedCell::allocator), and cloned along with the cell,
/// but this crate never allocates through it.
///
/// # Examples
///
/// ```rust
/// use tracked_cell::{LogSink, TrackedCell};
///
/// let mut cell = TrackedCell::new(String::from("hi"));
/// cell.set_sink(LogSink::new(|n| println!("{n} accesses")));
///
/// let len = cell.access().len(); // one episode; prints "1 accesses" at `;`
/// assert_eq!(len, 2);
/// assert_eq!(cell.access_count(), 0); // drained
/// ```
pub struct TrackedCell<T, A = ()> {
    value: T,
    alloc: A,
    access_count: Cell<u32>,
    outstanding: Cell<u32>,
    sink: RefCell<LogSink>,
}

impl<T> TrackedCell<T> {
    /// Wraps `value` with zeroed counters and no sink.
    pub fn new(value: T) -> Self {
        Self::new_in(value, ())
    }
}

impl<T, A> TrackedCell<T, A> {
    /// Wraps `value`, threading through an allocator-like handle.
    ///
    /// Counters start at zero and the sink is empty.
    pub fn new_in(value: T, alloc: A) -> Self {
        Self {
            value,
            alloc,
            access_count: Cell::new(0),
            outstanding: Cell::new(0),
            sink: RefCell::new(LogSink::empty()),
        }
    }

    /// Begins one access episode: increments both counters and returns a
    /// guard that dereferences to the payload.
    ///
    /// Guards may overlap freely. The sink fires only when the *last*
    /// outstanding guard is dropped.
    pub fn access(&self) -> AccessGuard<'_, T, A> {
        self.access_count.set(self.access_count.get() + 1);
        self.outstanding.set(self.outstanding.get() + 1);
        AccessGuard { cell: self }
    }

    /// Returns a reference to the payload **without** touching the
    /// counters.
    ///
    /// Use this for inspection that should not be accounted, such as
    /// comparisons or logging the value itself.
    #[inline]
    pub fn peek(&self) -> &T {
        &self.value
    }

    /// Mutable, uncounted access to the payload.
    ///
    /// Taking `&mut self` statically excludes live guards, so this can
    /// never race with release bookkeeping.
    #[inline]
    pub fn peek_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Replaces the sink. Counters are unaffected.
    ///
    /// `&mut self` means no guard is live, so replacement always lands
    /// between reports.
    #[inline]
    pub fn set_sink(&mut self, sink: LogSink) {
        *self.sink.get_mut() = sink;
    }

    /// Removes the sink; subsequent reports are swallowed.
    #[inline]
    pub fn clear_sink(&mut self) {
        *self.sink.get_mut() = LogSink::empty();
    }

    /// Access episodes since the last report.
    #[inline]
    pub fn access_count(&self) -> u32 {
        self.access_count.get()
    }

    /// Guards currently alive.
    #[inline]
    pub fn outstanding_count(&self) -> u32 {
        self.outstanding.get()
    }

    /// Returns the allocator-like handle this cell was built with.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Consumes the cell and returns the payload. Pending access counts and
    /// the sink are discarded without a final report.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Release hook, run by [`AccessGuard::drop`].
    ///
    /// Decrements the outstanding count; when it reaches zero, drains the
    /// access count and hands it to the sink.
    pub(crate) fn release(&self) {
        let outstanding = self.outstanding.get();
        if outstanding == 0 {
            return;
        }
        self.outstanding.set(outstanding - 1);
        if outstanding > 1 {
            // Another guard is still alive; defer the report.
            return;
        }
        let drained = self.access_count.replace(0);
        self.sink.borrow_mut().invoke(drained);
    }
}

impl<T: Default, A: Default> Default for TrackedCell<T, A> {
    fn default() -> Self {
        Self::new_in(T::default(), A::default())
    }
}

impl<T> From<T> for TrackedCell<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Clone, A: Clone> Clone for TrackedCell<T, A> {
    /// Clones payload and allocator handle, duplicates the sink (empty if
    /// the sink is not duplicable), and zeroes both counters.
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            alloc: self.alloc.clone(),
            access_count: Cell::new(0),
            outstanding: Cell::new(0),
            sink: RefCell::new(self.sink.borrow().clone()),
        }
    }
}

impl<T: fmt::Debug, A> fmt::Debug for TrackedCell<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedCell")
            .field("value", &self.value)
            .field("access_count", &self.access_count.get())
            .field("outstanding", &self.outstanding.get())
            .field("sink", &self.sink.borrow())
            .finish()
    }
}

impl<T: PartialEq, A> PartialEq for TrackedCell<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl<T: Eq, A> Eq for TrackedCell<T, A> {}
impl<T: PartialOrd, A> PartialOrd for TrackedCell<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}
impl<T: Ord, A> Ord for TrackedCell<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}
impl<T: Hash, A> Hash for TrackedCell<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state)
    }
}
