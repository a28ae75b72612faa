//! Hash function trait for slot index derivation.
//!
//! Hash functions operate on byte slices so the same entry hashes the same
//! way in every process, which is what lets a filter be persisted and
//! queried again after [`load`](crate::Filter::load_from).

#![allow(clippy::module_name_repetitions)]

/// Base hasher trait for Bloom filter hash functions.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Determinism**: same bytes and seed give the same output in every process
///   and on every platform, or persisted filters stop answering correctly
/// - **Seed independence**: outputs for different seeds over the same bytes
///   must be statistically independent
/// - **Uniform distribution** across the `u64` space, since the low bits are
///   used directly as slot indices
///
/// # Examples
///
/// ```
/// use bloomslot::hash::{BloomHasher, XxHasher};
///
/// let hasher = XxHasher::new();
/// assert_eq!(hasher.hash_bytes(b"entry"), hasher.hash_bytes(b"entry"));
/// assert_ne!(
///     hasher.hash_bytes_with_seed(b"entry", 0),
///     hasher.hash_bytes_with_seed(b"entry", 1),
/// );
/// ```
pub trait BloomHasher: Send + Sync {
    /// Hash arbitrary bytes to a 64-bit value.
    fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        self.hash_bytes_with_seed(bytes, 0)
    }

    /// Hash bytes under an explicit seed.
    ///
    /// Different seeds MUST produce independent outputs; [`HashScheme`]
    /// derives its `k` digests by seeding with the iteration index.
    ///
    /// [`HashScheme`]: crate::hash::HashScheme
    fn hash_bytes_with_seed(&self, bytes: &[u8], seed: u64) -> u64;

    /// Human-readable name for logs and debugging.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// FNV-1a with the seed folded into the offset basis. Only used to check
    /// the provided method.
    struct Fnv;

    impl BloomHasher for Fnv {
        fn hash_bytes_with_seed(&self, bytes: &[u8], seed: u64) -> u64 {
            let mut state = 0xcbf2_9ce4_8422_2325 ^ seed;
            for &byte in bytes {
                state ^= u64::from(byte);
                state = state.wrapping_mul(0x0100_0000_01b3);
            }
            state
        }

        fn name(&self) -> &'static str {
            "FNV-1a"
        }
    }

    #[test]
    fn test_hash_bytes_defaults_to_seed_zero() {
        let hasher = Fnv;
        assert_eq!(
            hasher.hash_bytes(b"payload"),
            hasher.hash_bytes_with_seed(b"payload", 0)
        );
    }

    #[test]
    fn test_trait_object_usable() {
        let hasher: Box<dyn BloomHasher> = Box::new(Fnv);
        assert_eq!(hasher.name(), "FNV-1a");
        assert_ne!(hasher.hash_bytes(b"a"), hasher.hash_bytes(b"b"));
    }
}
