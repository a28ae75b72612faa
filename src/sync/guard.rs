//! Reader/writer guard around a filter's slot storage.
//!
//! # Locking Protocol
//!
//! | Access           | Entry point        | Lock      | Blocks on                 |
//! |------------------|--------------------|-----------|---------------------------|
//! | read a slot      | [`SyncGuard::read`]  | shared    | an active writer          |
//! | mark a slot      | [`SyncGuard::write`] | exclusive | active readers and writer |
//! | unsynchronized   | [`SyncGuard::get_mut`] | none    | never                     |
//!
//! Any number of readers proceed together. A writer waits for active readers
//! to drain and keeps new readers and writers out until it finishes.
//! `parking_lot::RwLock` is writer-fair, so a steady stream of readers does
//! not starve writers; beyond that there is no fairness, priority, or
//! timeout guarantee.
//!
//! The unsynchronized path takes `&mut self`. Exclusive borrow is the
//! external synchronization, so it can never race with the locked path.
//!
//! No guard is ever held across a call into another guarded value, so lock
//! acquisition cannot deadlock.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Exclusively owned reader/writer lock over slot storage `S`.
///
/// Dropping the guard drops the storage; there is no separate teardown step.
///
/// # Examples
///
/// ```
/// use bloomslot::sync::SyncGuard;
///
/// let guard = SyncGuard::new(vec![0u8; 64]);
/// guard.write()[3] = 1;
/// assert_eq!(guard.read()[3], 1);
/// ```
#[derive(Debug, Default)]
pub struct SyncGuard<S> {
    inner: RwLock<S>,
}

impl<S> SyncGuard<S> {
    /// Wrap `storage` in a fresh lock.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self {
            inner: RwLock::new(storage),
        }
    }

    /// Acquire shared access, blocking while a writer is active.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, S> {
        self.inner.read()
    }

    /// Acquire exclusive access, blocking until all readers and any writer finish.
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, S> {
        self.inner.write()
    }

    /// Unsynchronized access through an exclusive borrow. Never blocks.
    #[inline]
    pub fn get_mut(&mut self) -> &mut S {
        self.inner.get_mut()
    }

    /// Run `f` under shared access.
    #[inline]
    pub fn with_shared<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` under exclusive access.
    #[inline]
    pub fn with_exclusive<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Consume the guard and return the storage.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }
}
