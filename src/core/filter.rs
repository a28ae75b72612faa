//! Fixed-size Bloom filter over a pluggable slot layout.
//!
//! [`Filter`] combines three pieces:
//!
//! ```text
//! Filter<S, H>
//! ├─ slots: SyncGuard<S>     ← slot storage behind one reader/writer lock
//! ├─ size: usize             ← logical slot count (power of two, ≥ 64)
//! └─ scheme: HashScheme<H>   ← k seeded digests per entry
//! ```
//!
//! The two concrete filters differ only in `S`:
//!
//! - [`PackedBitFilter`]: one bit per slot ([`PackedBits`])
//! - [`AlignedByteFilter`]: one byte per slot ([`AlignedBytes`])
//!
//! # Lifecycle
//!
//! A filter is Active from a successful constructor until it is dropped.
//! Dropping releases the slot storage and the lock together; there is no
//! separate destroy call and no way to use a filter afterwards.
//!
//! # Monotonicity
//!
//! Slots only ever go from clear to marked. Once [`insert`](Filter::insert)
//! returns `Ok`, [`lookup`](Filter::lookup) of the same entry returns `true`
//! for the rest of the filter's life, and after any merge into it.
//!
//! # Partial Inserts
//!
//! `insert` does not roll back. Folding keeps every index in range, so a
//! mid-entry failure cannot happen through the public API; if it did, the
//! slots already marked for that entry would stay marked.

use crate::core::params;
use crate::core::slots::{AlignedBytes, PackedBits, SlotStore, Strategy};
use crate::error::{BloomError, Result};
use crate::hash::{BloomHasher, HashScheme, XxHasher};
use crate::sync::SyncGuard;
use crate::util::bitops::fold;
use std::fmt;
use tracing::{debug, warn};

/// Bloom filter with one bit per slot.
pub type PackedBitFilter<H = XxHasher> = Filter<PackedBits, H>;

/// Bloom filter with one byte per slot.
pub type AlignedByteFilter<H = XxHasher> = Filter<AlignedBytes, H>;

/// Fixed-size, monotonic Bloom filter.
///
/// All `&self` methods are synchronized through the filter's [`SyncGuard`]:
/// marks take exclusive access, reads take shared access. The `*_unsynced`
/// methods take `&mut self` and skip the lock entirely.
///
/// # Type Parameters
///
/// - `S`: slot layout ([`PackedBits`] or [`AlignedBytes`])
/// - `H`: hash function (defaults to [`XxHasher`])
///
/// # Examples
///
/// ```
/// use bloomslot::PackedBitFilter;
///
/// let filter = PackedBitFilter::new(1_048_576, 4)?;
/// filter.insert("b99afb65c9f97b2e0feea844eea55f69")?;
///
/// assert!(filter.lookup("b99afb65c9f97b2e0feea844eea55f69")?);
/// assert!(!filter.lookup("hahaidontexist")?);
/// # Ok::<(), bloomslot::BloomError>(())
/// ```
pub struct Filter<S, H = XxHasher> {
    slots: SyncGuard<S>,
    size: usize,
    scheme: HashScheme<H>,
}

impl<S: SlotStore> Filter<S, XxHasher> {
    /// Create an empty filter with `size` slots and `hash_count` digests per entry.
    ///
    /// # Errors
    ///
    /// - `InvalidSize` if `size < 64`
    /// - `NotPowerOfTwo` if `size` is not a power of two
    /// - `InvalidHashCount` if `hash_count == 0`
    /// - `AllocationFailure` if slot storage cannot be allocated
    ///
    /// Nothing is allocated when validation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomslot::{AlignedByteFilter, BloomError};
    ///
    /// assert!(AlignedByteFilter::new(1024, 3).is_ok());
    /// assert!(matches!(
    ///     AlignedByteFilter::new(100_000, 4),
    ///     Err(BloomError::NotPowerOfTwo { .. })
    /// ));
    /// assert!(matches!(AlignedByteFilter::new(32, 4), Err(BloomError::InvalidSize { .. })));
    /// ```
    pub fn new(size: usize, hash_count: u32) -> Result<Self> {
        Self::with_hasher(size, hash_count, XxHasher::new())
    }
}

impl<S: SlotStore, H: BloomHasher> Filter<S, H> {
    /// Create an empty filter using a caller-supplied hasher.
    ///
    /// The hasher is not persisted; a filter written with a custom hasher must
    /// be loaded with the same one.
    ///
    /// # Errors
    ///
    /// Same as [`Filter::new`].
    pub fn with_hasher(size: usize, hash_count: u32, hasher: H) -> Result<Self> {
        params::validate(size, hash_count)?;
        let store = S::zeroed(size)?;

        debug!(
            size,
            hash_count,
            strategy = %S::STRATEGY,
            hasher = hasher.name(),
            "created filter"
        );

        Ok(Self::from_store(store, HashScheme::with_hasher(hash_count, hasher)))
    }

    /// Assemble a filter from storage that already passed validation.
    pub(crate) fn from_store(store: S, scheme: HashScheme<H>) -> Self {
        Self {
            size: store.len(),
            slots: SyncGuard::new(store),
            scheme,
        }
    }

    /// Logical slot count.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Digests derived per entry (k).
    #[must_use]
    #[inline]
    pub fn hash_count(&self) -> u32 {
        self.scheme.hash_count()
    }

    /// Storage layout of this filter.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        S::STRATEGY
    }

    /// The hashing scheme used to derive slot indices.
    #[must_use]
    pub fn scheme(&self) -> &HashScheme<H> {
        &self.scheme
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.size {
            return Err(BloomError::index_out_of_range(index, self.size));
        }
        Ok(())
    }

    /// Mark slot `index` under exclusive access.
    ///
    /// Idempotent: marking an already marked slot succeeds.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index >= size`.
    pub fn set_slot(&self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.slots.with_exclusive(|store| store.set(index));
        Ok(())
    }

    /// Mark slot `index` without locking.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index >= size`.
    pub fn set_slot_unsynced(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.slots.get_mut().set(index);
        Ok(())
    }

    /// Whether slot `index` is marked, read under shared access.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index >= size`.
    pub fn get_slot(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.slots.with_shared(|store| store.get(index)))
    }

    /// Whether slot `index` is marked, read without locking.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index >= size`.
    pub fn get_slot_unsynced(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.slots.get_mut().get(index))
    }

    /// Insert `entry`, marking all `k` of its slots in one exclusive section.
    ///
    /// Digests are computed before the lock is taken.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the digest buffer cannot be allocated; the
    /// filter is untouched in that case.
    pub fn insert(&self, entry: impl AsRef<[u8]>) -> Result<()> {
        let digests = self.scheme.digests(entry.as_ref())?;
        let size = self.size;
        self.slots.with_exclusive(|store| mark_digests(store, size, &digests))
    }

    /// Insert `entry` without locking.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn insert_unsynced(&mut self, entry: impl AsRef<[u8]>) -> Result<()> {
        let digests = self.scheme.digests(entry.as_ref())?;
        let size = self.size;
        mark_digests(self.slots.get_mut(), size, &digests)
    }

    /// Insert many entries under a single exclusive section.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` while hashing; no entry is marked in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomslot::PackedBitFilter;
    ///
    /// let filter = PackedBitFilter::new(1 << 12, 3)?;
    /// filter.insert_batch(["apple", "banana", "cherry"])?;
    /// assert!(filter.lookup("banana")?);
    /// # Ok::<(), bloomslot::BloomError>(())
    /// ```
    pub fn insert_batch<I, E>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = E>,
        E: AsRef<[u8]>,
    {
        let k = self.hash_count() as usize;
        let mut digests = Vec::new();
        for entry in entries {
            digests.try_reserve(k).map_err(|_| {
                BloomError::allocation_failure(
                    (digests.len() + k).saturating_mul(std::mem::size_of::<u64>()),
                )
            })?;
            digests.extend(self.scheme.digests(entry.as_ref())?);
        }
        let size = self.size;
        self.slots.with_exclusive(|store| mark_digests(store, size, &digests))
    }

    /// Whether `entry` may have been inserted.
    ///
    /// `false` means definitely absent. `true` means possibly present: every
    /// one of the entry's `k` slots is marked. Stops at the first clear slot.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the digest buffer cannot be allocated.
    pub fn lookup(&self, entry: impl AsRef<[u8]>) -> Result<bool> {
        let digests = self.scheme.digests(entry.as_ref())?;
        let size = self.size;
        Ok(self.slots.with_shared(|store| all_marked(store, size, &digests)))
    }

    /// [`lookup`](Self::lookup) without locking.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the digest buffer cannot be allocated.
    pub fn lookup_unsynced(&mut self, entry: impl AsRef<[u8]>) -> Result<bool> {
        let digests = self.scheme.digests(entry.as_ref())?;
        let size = self.size;
        Ok(all_marked(self.slots.get_mut(), size, &digests))
    }

    /// Fail with `ParameterMismatch` unless the given shape matches this filter.
    pub(crate) fn ensure_shape(&self, size: usize, hash_count: u32) -> Result<()> {
        if self.size != size {
            warn!(ours = self.size, theirs = size, "filter size mismatch");
            return Err(BloomError::parameter_mismatch(format!(
                "size {} vs {}",
                self.size, size
            )));
        }
        if self.hash_count() != hash_count {
            warn!(
                ours = self.hash_count(),
                theirs = hash_count,
                "filter hash count mismatch"
            );
            return Err(BloomError::parameter_mismatch(format!(
                "hash count {} vs {}",
                self.hash_count(),
                hash_count
            )));
        }
        Ok(())
    }

    /// OR `other`'s slots into this filter.
    ///
    /// `other` is snapshotted under its own shared lock first, then this
    /// filter's exclusive lock is taken, so the two locks are never held
    /// together.
    ///
    /// # Errors
    ///
    /// `ParameterMismatch` if the sizes or hash counts differ; this filter is
    /// left unmodified.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomslot::PackedBitFilter;
    ///
    /// let a = PackedBitFilter::new(1024, 3)?;
    /// let b = PackedBitFilter::new(1024, 3)?;
    /// a.insert("alice")?;
    /// b.insert("bob")?;
    ///
    /// a.union(&b)?;
    /// assert!(a.lookup("alice")? && a.lookup("bob")?);
    /// # Ok::<(), bloomslot::BloomError>(())
    /// ```
    pub fn union(&self, other: &Self) -> Result<()> {
        self.ensure_shape(other.size, other.hash_count())?;
        if std::ptr::eq(self, other) {
            return Ok(());
        }
        let snapshot = other.slots.with_shared(S::clone);
        self.absorb(&snapshot);
        Ok(())
    }

    /// OR already-validated storage into this filter under exclusive access.
    pub(crate) fn absorb(&self, other: &S) {
        self.slots.with_exclusive(|store| store.union_with(other));
    }

    /// Run `f` over the slot storage under shared access.
    pub(crate) fn with_slots<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.slots.with_shared(f)
    }

    /// Copy of the current slot storage.
    #[must_use]
    pub fn snapshot(&self) -> S {
        self.slots.with_shared(S::clone)
    }

    /// Consume the filter and return its slot storage.
    #[must_use]
    pub fn into_slots(self) -> S {
        self.slots.into_inner()
    }

    /// Number of marked slots.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.slots.with_shared(SlotStore::count_ones)
    }

    /// Fraction of slots marked, in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fill_ratio(&self) -> f64 {
        self.count_ones() as f64 / self.size as f64
    }

    /// False positive rate implied by the current fill ratio.
    #[must_use]
    pub fn estimated_fp_rate(&self) -> f64 {
        params::fp_rate_from_fill(self.fill_ratio(), self.hash_count())
    }

    /// Bytes of slot storage held.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.slots.with_shared(SlotStore::memory_usage)
    }
}

fn mark_digests<S: SlotStore>(store: &mut S, size: usize, digests: &[u64]) -> Result<()> {
    for &digest in digests {
        let index = fold(digest, size);
        if index >= size {
            return Err(BloomError::index_out_of_range(index, size));
        }
        store.set(index);
    }
    Ok(())
}

fn all_marked<S: SlotStore>(store: &S, size: usize, digests: &[u64]) -> bool {
    digests.iter().all(|&digest| store.get(fold(digest, size)))
}

impl<S: SlotStore, H: BloomHasher + Clone> Clone for Filter<S, H> {
    fn clone(&self) -> Self {
        Self::from_store(self.snapshot(), self.scheme.clone())
    }
}

impl<S: SlotStore, H: BloomHasher> fmt::Debug for Filter<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("strategy", &S::STRATEGY)
            .field("size", &self.size)
            .field("hash_count", &self.hash_count())
            .field("hasher", &self.scheme.hasher().name())
            .finish()
    }
}
