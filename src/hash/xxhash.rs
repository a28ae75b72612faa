//! XXH64 hasher.
//!
//! XXH64 is the 64-bit member of the xxHash family: fast, passes SMHasher,
//! and natively seedable, which is what [`HashScheme`](super::HashScheme)
//! needs to derive `k` independent digests from one entry.
//!
//! This module wraps the `xxhash-rust` crate.

#![allow(clippy::module_name_repetitions)]

use super::hasher::BloomHasher;

use xxhash_rust::xxh64::xxh64;

/// XXH64 hasher with a base seed.
///
/// The base seed is added to the per-call seed, so two hashers with different
/// base seeds give unrelated digest sequences for the same entry. The default
/// base seed is `0`, under which digest 0 of an entry is plain `XXH64(entry, 0)`.
///
/// # Examples
///
/// ```
/// use bloomslot::hash::{BloomHasher, XxHasher};
///
/// let h1 = XxHasher::with_seed(1).hash_bytes(b"test");
/// let h2 = XxHasher::with_seed(2).hash_bytes(b"test");
/// assert_ne!(h1, h2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XxHasher {
    seed: u64,
}

impl XxHasher {
    /// Create a hasher with base seed `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self { seed: 0 }
    }

    /// Create a hasher with an explicit base seed.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// The base seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl BloomHasher for XxHasher {
    #[inline]
    fn hash_bytes_with_seed(&self, bytes: &[u8], seed: u64) -> u64 {
        xxh64(bytes, self.seed.wrapping_add(seed))
    }

    #[inline]
    fn name(&self) -> &'static str {
        "XXH64"
    }
}
