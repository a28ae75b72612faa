//! Repeated-hashing scheme: `k` seeded digests per entry.
//!
//! # Derivation
//!
//! ```text
//! digest_i = H(entry, seed = i)      for i in 0..k
//! index_i  = digest_i & (size - 1)
//! ```
//!
//! Every digest hashes the full entry under a distinct seed, so the `k`
//! outputs are independent for a fixed entry. Hashing the same bytes under
//! the same seed `k` times would give `k` copies of one digest and collapse
//! the filter to a single hash function; the tests below guard against that.
//!
//! Digests depend only on the entry bytes, the hasher, and `k`, so a filter
//! reloaded in another process folds entries onto the same slots.

use super::hasher::BloomHasher;
use super::xxhash::XxHasher;
use crate::error::{BloomError, Result};
use crate::util::bitops::fold;

/// Derives `hash_count` digests from an entry.
///
/// # Examples
///
/// ```
/// use bloomslot::hash::HashScheme;
///
/// let scheme = HashScheme::new(4);
/// let digests = scheme.digests(b"entry").unwrap();
/// assert_eq!(digests.len(), 4);
/// assert_eq!(digests, scheme.digests(b"entry").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashScheme<H = XxHasher> {
    hash_count: u32,
    hasher: H,
}

impl HashScheme<XxHasher> {
    /// Scheme over the default XXH64 hasher.
    #[must_use]
    pub const fn new(hash_count: u32) -> Self {
        Self {
            hash_count,
            hasher: XxHasher::new(),
        }
    }

    /// Fold a digest onto a slot index of a power-of-two `size`.
    #[inline]
    #[must_use]
    pub const fn fold(digest: u64, size: usize) -> usize {
        fold(digest, size)
    }
}

impl<H: BloomHasher> HashScheme<H> {
    /// Scheme over a caller-supplied hasher.
    #[must_use]
    pub const fn with_hasher(hash_count: u32, hasher: H) -> Self {
        Self { hash_count, hasher }
    }

    /// Number of digests derived per entry (k).
    #[must_use]
    #[inline]
    pub const fn hash_count(&self) -> u32 {
        self.hash_count
    }

    /// The underlying hasher.
    #[must_use]
    pub const fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Digest `i` of `entry`.
    #[inline]
    #[must_use]
    pub fn digest(&self, entry: &[u8], i: u32) -> u64 {
        self.hasher.hash_bytes_with_seed(entry, u64::from(i))
    }

    /// All `k` digests of `entry`, in iteration order.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the output buffer cannot be reserved.
    pub fn digests(&self, entry: &[u8]) -> Result<Vec<u64>> {
        let k = self.hash_count as usize;
        let mut out = Vec::new();
        out.try_reserve_exact(k)
            .map_err(|_| BloomError::allocation_failure(k * std::mem::size_of::<u64>()))?;
        out.extend((0..self.hash_count).map(|i| self.digest(entry, i)));
        Ok(out)
    }

    /// All `k` digests of `entry` folded into `[0, size)`.
    ///
    /// `size` must be a power of two.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the output buffer cannot be reserved.
    pub fn indices(&self, entry: &[u8], size: usize) -> Result<Vec<usize>> {
        Ok(self
            .digests(entry)?
            .into_iter()
            .map(|d| fold(d, size))
            .collect())
    }
}
