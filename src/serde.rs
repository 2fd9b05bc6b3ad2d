// This file is part of tracked-cell.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `serde` support for [`TrackedCell`](crate::TrackedCell).
//!
//! - **Serialize**: transparently, exactly as the payload serializes.
//!   Counters and the sink are runtime bookkeeping, not data, and never
//!   appear in serialized output.
//! - **Deserialize**: produces a fresh cell around the deserialized
//!   payload — zero counters, empty sink, `A::default()` as the allocator
//!   handle.
//!
//! ### Trait bounds
//!
//! - `TrackedCell<T, A>: Serialize` whenever `T: Serialize` (no bound on
//!   `A`).
//! - `TrackedCell<T, A>: Deserialize<'de>` whenever `T: Deserialize<'de>`
//!   and `A: Default`.

// Crate imports
use crate::cell::TrackedCell;

// External imports - serde
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl<T: Serialize, A> Serialize for TrackedCell<T, A> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.peek().serialize(s)
    }
}

impl<'de, T: Deserialize<'de>, A: Default> Deserialize<'de> for TrackedCell<T, A> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        T::deserialize(d).map(|value| TrackedCell::new_in(value, A::default()))
    }
}
