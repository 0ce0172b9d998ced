// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Traced decorators for the data-store object families.
//!
//! Each family is described by a backend trait (the opaque underlying
//! client) and a `Traced*` decorator that implements the same trait over
//! any backend, making the traced object a drop-in replacement: identical
//! signatures, identical success/error behavior, spans as the only
//! observable difference.
//!
//! The decorators contain no logic of their own: every method builds a
//! span, tags the call's arguments, and hands the underlying call to the
//! [`Instrumenter`](crate::Instrumenter). New families follow the same
//! mechanical shape.

mod atomic;
mod bucket;
mod keys;
mod lock;
mod map;
mod queue;
mod semaphore;

pub use atomic::{AtomicCounterOps, TracedAtomicCounter};
pub use bucket::{BucketOps, TracedBucket};
pub use keys::{KeysOps, TracedKeys};
pub use lock::{LockOps, TracedLock};
pub use map::{MapOps, TracedMap};
pub use queue::{QueueOps, TracedQueue};
pub use semaphore::{SemaphoreOps, TracedSemaphore};

/// An object living in the store under a logical name.
///
/// The name is what the `name` span tag carries for every operation on the
/// object.
pub trait StoreObject {
    /// Logical identifier of this object in the store (its key).
    fn name(&self) -> &str;
}
