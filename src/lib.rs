// This file is part of tracked-cell.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # `tracked-cell`
//!
//! A `no_std` (plus `alloc`) value wrapper that counts **access episodes**
//! and reports them, in batches, to a pluggable logging sink — with no
//! `unsafe` anywhere.
//!
//! The core type, [`TrackedCell<T>`], owns a value of type `T`. Instead of
//! handing out raw references, [`TrackedCell::access`] returns a short-lived
//! [`AccessGuard`] that dereferences to the value. The cell keeps two
//! counters:
//!
//! - an **access count**: how many guards have been created since the last
//!   report, and
//! - an **outstanding count**: how many guards are currently alive.
//!
//! When the last outstanding guard is dropped, the cell invokes its
//! [`LogSink`] exactly once with the accumulated access count, then resets
//! the count to zero. Many overlapping accesses produce one report.
//!
//! ## When to use this crate
//!
//! This crate may be useful when:
//!
//! - You want to know how often a value is reached for, without editing
//!   every call site.
//! - You want one log line per burst of accesses, not one per access.
//! - You need the instrumented wrapper to stay cloneable even when the
//!   attached logger is not.
//!
//! It may not be the best fit if:
//!
//! - You need per-dereference granularity: dereferencing one guard many
//!   times still counts as a single access episode.
//! - You need to share one cell across threads. All bookkeeping is plain
//!   single-threaded interior mutability; the cell is not `Sync`. Wrap it in
//!   a lock or keep one cell per thread.
//!
//! ## The sink and graceful degradation
//!
//! [`LogSink`] stores *some* callable `FnMut(u32)` behind a type-erased
//! owning handle, and remembers at construction time whether that callable
//! can be duplicated:
//!
//! - [`LogSink::cloneable`] accepts a `Clone` callable; clones of the sink
//!   carry an independent copy of it.
//! - [`LogSink::new`] accepts any callable; clones of the sink are
//!   **empty**.
//!
//! Cloning never fails: a cell whose sink cannot be duplicated clones into a
//! cell with no sink, not into an error. This is the defining contract of
//! the sink. An empty sink swallows invocations silently.
//!
//! ## Counter semantics
//!
//! - [`TrackedCell::access`] increments both counters by one.
//! - Dropping a guard decrements the outstanding count; when it reaches
//!   zero, the sink is invoked with the access count and the access count
//!   resets to zero.
//! - [`TrackedCell::peek`] and [`TrackedCell::peek_mut`] hand out plain
//!   references without touching either counter, for callers that do not
//!   want the access accounted.
//! - Cloning a cell zeroes both counters in the clone; bookkeeping never
//!   transfers.
//! - Comparison (`==`, `<`), hashing, and `serde` serialization all delegate
//!   to the wrapped value alone; counters and sink never participate.
//!
//! ## Features
//!
//! - `serde`
//!   - Enables `Serialize` / `Deserialize` for `TrackedCell<T, A>`.
//!   - Serialization is transparent: a cell serializes exactly as its
//!     payload does.
//!   - Deserialization produces a fresh cell: zero counters, empty sink.
//!
//! ## Example
//!
//! ```rust
//! use core::cell::RefCell;
//! use std::rc::Rc;
//! use tracked_cell::{LogSink, TrackedCell};
//!
//! let reports = Rc::new(RefCell::new(Vec::new()));
//! let mut cell = TrackedCell::new(42);
//! let sink_reports = Rc::clone(&reports);
//! cell.set_sink(LogSink::cloneable(move |n| sink_reports.borrow_mut().push(n)));
//!
//! {
//!     let a = cell.access();
//!     let b = cell.access(); // overlaps with `a`
//!     assert_eq!(*a + *b, 84);
//! } // last guard dropped here: one report for both accesses
//!
//! assert_eq!(reports.borrow().as_slice(), &[2]);
//! ```
//!
//! See [`TrackedCell`] for detailed semantics, including clone behavior and
//! the allocator-handle parameter.

#![forbid(unsafe_code)]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

// Modules
mod cell;
mod guard;
#[cfg(feature = "serde")]
mod serde;
mod sink;

// Public exports (crate API surface)
pub use cell::TrackedCell;
pub use guard::AccessGuard;
pub use sink::LogSink;
