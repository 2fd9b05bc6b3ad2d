// This file is part of tracked-cell.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The [`LogSink`] type: an owning, type-erased handle around a logging
//! callable.
//!
//! A sink stores some `FnMut(u32)` without exposing its concrete type. The
//! one capability that varies between callables — whether an independent
//! copy of the captured state can be made — is fixed when the sink is
//! constructed:
//!
//! - [`LogSink::cloneable`] erases a `Clone` callable and keeps the ability
//!   to duplicate it.
//! - [`LogSink::new`] erases any callable; duplication yields an empty sink.
//!
//! "Cannot duplicate" is representable, not exceptional: [`Clone`] on a
//! sink never fails, it degrades to [`LogSink::empty`].

// Alloc imports
use alloc::boxed::Box;

// Core imports
use core::fmt;

/// Object-safe view of a stored callable: invocation plus optional
/// duplication. The duplication capability is decided by the adapter type,
/// not queried from the callable at runtime.
trait ErasedSink {
    fn invoke(&mut self, count: u32);
    fn try_clone_box(&self) -> Option<Box<dyn ErasedSink>>;
}

/// Adapter for callables whose captured state can be copied.
struct CloneableSink<F>(F);

impl<F: FnMut(u32) + Clone + 'static> ErasedSink for CloneableSink<F> {
    fn invoke(&mut self, count: u32) {
        (self.0)(count);
    }

    fn try_clone_box(&self) -> Option<Box<dyn ErasedSink>> {
        Some(Box::new(CloneableSink(self.0.clone())))
    }
}

/// Adapter for callables that cannot (or should not) be copied.
struct OpaqueSink<F>(F);

impl<F: FnMut(u32) + 'static> ErasedSink for OpaqueSink<F> {
    fn invoke(&mut self, count: u32) {
        (self.0)(count);
    }

    fn try_clone_box(&self) -> Option<Box<dyn ErasedSink>> {
        None
    }
}

/// An owning, type-erased, possibly-empty handle around an `FnMut(u32)`
/// logging callable.
///
/// A [`TrackedCell`](crate::TrackedCell) holds one of these and invokes it
/// with the accumulated access count each time its outstanding guard count
/// drains to zero. The cell never learns the callable's concrete type, only
/// the two operations that survive erasure:
///
/// - [`invoke`](LogSink::invoke) — call the stored callable; a silent no-op
///   when the sink is empty.
/// - [`Clone`] — produce an independent copy of the stored callable if the
///   sink was built with [`cloneable`](LogSink::cloneable), otherwise an
///   **empty** sink. Duplication never fails.
///
/// Moving a sink transfers ownership of the callable, as any Rust move
/// does.
///
/// # Examples
///
/// ```rust
/// use tracked_cell::LogSink;
///
/// let mut sink = LogSink::cloneable(|n| println!("drained {n} accesses"));
/// assert!(!sink.is_empty());
/// assert!(sink.is_duplicable());
/// sink.invoke(3);
///
/// let copy = sink.clone();
/// assert!(!copy.is_empty());
///
/// // A sink built with `new` still invokes, but clones to empty.
/// let undup = LogSink::new(|_| ());
/// assert!(undup.clone().is_empty());
/// ```
pub struct LogSink {
    inner: Option<Box<dyn ErasedSink>>,
}

impl LogSink {
    /// Erases `f` into a sink that is **not** duplicable.
    ///
    /// Use this for callables that capture state with no meaningful copy
    /// (an owned file handle, a oneshot channel, ...). Cloning the
    /// resulting sink — directly or by cloning a cell that holds it —
    /// yields [`LogSink::empty`].
    pub fn new<F: FnMut(u32) + 'static>(f: F) -> Self {
        Self {
            inner: Some(Box::new(OpaqueSink(f))),
        }
    }

    /// Erases `f` into a duplicable sink.
    ///
    /// Clones of this sink hold an independent `f.clone()`; invocations on
    /// one copy are never observed by another.
    pub fn cloneable<F: FnMut(u32) + Clone + 'static>(f: F) -> Self {
        Self {
            inner: Some(Box::new(CloneableSink(f))),
        }
    }

    /// The empty sink: invocations are swallowed, clones stay empty.
    #[inline]
    pub const fn empty() -> Self {
        Self { inner: None }
    }

    /// Calls the stored callable with `count`. Does nothing if the sink is
    /// empty.
    #[inline]
    pub fn invoke(&mut self, count: u32) {
        if let Some(sink) = self.inner.as_mut() {
            sink.invoke(count);
        }
    }

    /// Returns `true` if no callable is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns `true` if cloning this sink produces a working copy rather
    /// than an empty one.
    #[inline]
    pub fn is_duplicable(&self) -> bool {
        // Probes the adapter without committing to a copy; a cloneable
        // adapter allocates one here and immediately drops it.
        self.inner
            .as_ref()
            .is_some_and(|sink| sink.try_clone_box().is_some())
    }
}

impl Default for LogSink {
    /// Equivalent to [`LogSink::empty`].
    fn default() -> Self {
        Self::empty()
    }
}

impl Clone for LogSink {
    /// Duplicates the stored callable if it supports duplication; otherwise
    /// returns an empty sink. Never fails.
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.as_ref().and_then(|sink| sink.try_clone_box()),
        }
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.inner {
            None => "empty",
            Some(sink) if sink.try_clone_box().is_some() => "cloneable",
            Some(_) => "opaque",
        };
        f.debug_tuple("LogSink").field(&state).finish()
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use super::LogSink;
    use alloc::format;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn recording_sink() -> (LogSink, Rc<RefCell<Vec<u32>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let writer = Rc::clone(&seen);
        let sink = LogSink::cloneable(move |n| writer.borrow_mut().push(n));
        (sink, seen)
    }

    #[test]
    fn test_invoke_delivers_count() {
        let (mut sink, seen) = recording_sink();
        sink.invoke(7);
        sink.invoke(0);
        assert_eq!(seen.borrow().as_slice(), &[7, 0]);
    }

    #[test]
    fn test_empty_sink_is_a_no_op() {
        let mut sink = LogSink::empty();
        assert!(sink.is_empty());
        assert!(!sink.is_duplicable());
        sink.invoke(99); // must not panic or do anything observable
    }

    #[test]
    fn test_default_is_empty() {
        assert!(LogSink::default().is_empty());
    }

    #[test]
    fn test_cloneable_sink_clones_to_working_copy() {
        let (sink, seen) = recording_sink();
        assert!(sink.is_duplicable());

        let mut copy = sink.clone();
        assert!(!copy.is_empty());
        copy.invoke(5);

        // The copied closure shares the Rc, so the invocation is visible;
        // what matters is that the copy works at all.
        assert_eq!(seen.borrow().as_slice(), &[5]);
    }

    #[test]
    fn test_opaque_sink_clones_to_empty() {
        let mut count = 0u32;
        let sink = LogSink::new(move |n| count += n);
        assert!(!sink.is_empty());
        assert!(!sink.is_duplicable());

        let mut copy = sink.clone();
        assert!(copy.is_empty());
        copy.invoke(1); // swallowed
    }

    #[test]
    fn test_clone_of_empty_stays_empty() {
        assert!(LogSink::empty().clone().is_empty());
    }

    #[test]
    fn test_mutable_capture_accumulates() {
        let total = Rc::new(RefCell::new(0u32));
        let writer = Rc::clone(&total);
        let mut sink = LogSink::new(move |n| *writer.borrow_mut() += n);
        sink.invoke(2);
        sink.invoke(3);
        assert_eq!(*total.borrow(), 5);
    }

    #[test]
    fn test_debug_names_the_capability() {
        assert_eq!(format!("{:?}", LogSink::empty()), "LogSink(\"empty\")");
        assert_eq!(
            format!("{:?}", LogSink::new(|_| ())),
            "LogSink(\"opaque\")"
        );
        assert_eq!(
            format!("{:?}", LogSink::cloneable(|_| ())),
            "LogSink(\"cloneable\")"
        );
    }
}
