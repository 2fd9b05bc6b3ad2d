// This file is part of tracked-cell.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The [`AccessGuard`] type: a scope-bound witness of one access episode.
//!
//! - Created only by [`TrackedCell::access`](crate::TrackedCell::access).
//! - Dereferences to the payload; repeated dereferences do not add
//!   episodes.
//! - Runs the cell's release bookkeeping exactly once, on drop, on every
//!   exit path.

// Crate imports
use crate::cell::TrackedCell;

// Core imports
use core::{fmt, ops::Deref};

/// A short-lived handle representing one counted access to a
/// [`TrackedCell`].
///
/// The guard borrows its cell, so it can never outlive it, and it is not
/// clonable: one call to [`access`](TrackedCell::access), one guard, one
/// release. Dropping the guard decrements the cell's outstanding count and,
/// if this was the last guard alive, triggers the sink report.
///
/// Only shared dereference is offered. Overlapping guards all alias the
/// cell, so mutable access goes through
/// [`TrackedCell::peek_mut`](TrackedCell::peek_mut) instead, which
/// statically excludes live guards.
pub struct AccessGuard<'a, T, A = ()> {
    pub(crate) cell: &'a TrackedCell<T, A>,
}

impl<T, A> Deref for AccessGuard<'_, T, A> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.cell.peek()
    }
}

impl<T, A> Drop for AccessGuard<'_, T, A> {
    fn drop(&mut self) {
        self.cell.release();
    }
}

impl<T: fmt::Debug, A> fmt::Debug for AccessGuard<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessGuard").field(&**self).finish()
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use crate::TrackedCell;
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn test_guard_derefs_to_payload() {
        let cell = TrackedCell::new(String::from("abc"));
        let g = cell.access();
        assert_eq!(g.len(), 3); // auto-deref through the guard
        assert_eq!(&*g, "abc");
    }

    #[test]
    fn test_guard_is_movable() {
        fn last_char(cell: &TrackedCell<String>) -> Option<char> {
            let g = cell.access();
            let moved = g; // move, not copy
            moved.chars().last()
        }

        let cell = TrackedCell::new(String::from("xyz"));
        assert_eq!(last_char(&cell), Some('z'));
        // The move did not double-release.
        assert_eq!(cell.outstanding_count(), 0);
        assert_eq!(cell.access_count(), 0);
    }

    #[test]
    fn test_explicit_drop_releases_immediately() {
        let cell = TrackedCell::new(0u8);
        let g = cell.access();
        assert_eq!(cell.outstanding_count(), 1);
        drop(g);
        assert_eq!(cell.outstanding_count(), 0);
    }

    #[test]
    fn test_guard_debug_shows_payload() {
        let cell = TrackedCell::new(17);
        let g = cell.access();
        assert_eq!(format!("{g:?}"), "AccessGuard(17)");
    }
}
