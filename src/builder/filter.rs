//! Builder and plain configuration for filters.
//!
//! # Type-State Pattern
//!
//! The builder progresses through states so a filter cannot be built
//! without both a size and a hash count:
//!
//! ```text
//! Initial → WithSize → Complete → Filter<S, H>
//!     ↓         ↓           ↓
//!   .size()  .hash_count()  .build::<S>()
//! ```
//!
//! `.hasher()` may be called in any state.
//!
//! # Examples
//!
//! ```
//! use bloomslot::builder::FilterBuilder;
//! use bloomslot::{PackedBitFilter, PackedBits};
//!
//! let filter: PackedBitFilter = FilterBuilder::new()
//!     .size(1 << 16)
//!     .hash_count(5)
//!     .build::<PackedBits>()?;
//! assert_eq!(filter.size(), 1 << 16);
//! # Ok::<(), bloomslot::BloomError>(())
//! ```
//!
//! ## From a Config Value
//!
//! ```
//! use bloomslot::builder::{FilterBuilder, FilterConfig};
//! use bloomslot::AlignedBytes;
//!
//! let config = FilterConfig::new(4096, 3);
//! let filter = FilterBuilder::from_config(config).build::<AlignedBytes>()?;
//! assert_eq!(filter.hash_count(), 3);
//! # Ok::<(), bloomslot::BloomError>(())
//! ```

use crate::core::params;
use crate::core::{Filter, SlotStore};
use crate::error::Result;
use crate::hash::{BloomHasher, XxHasher};
use std::marker::PhantomData;

/// Filter shape as a plain value, for embedding in host configuration.
///
/// Under the `serde` feature this (de)serializes as
/// `{ "size": 1048576, "hash_count": 4 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterConfig {
    /// Slot count; a power of two, at least 64.
    pub size: usize,
    /// Digests per entry; at least 1.
    pub hash_count: u32,
}

impl FilterConfig {
    /// Create a config without validating it.
    #[must_use]
    pub const fn new(size: usize, hash_count: u32) -> Self {
        Self { size, hash_count }
    }

    /// Check the shape with the same rules as [`Filter::new`].
    ///
    /// # Errors
    ///
    /// `InvalidSize`, `NotPowerOfTwo`, or `InvalidHashCount`.
    pub fn validate(&self) -> Result<()> {
        params::validate(self.size, self.hash_count)
    }

    /// Expected false positive rate after `items` insertions.
    #[must_use]
    pub fn expected_fp_rate(&self, items: usize) -> f64 {
        params::expected_fp_rate(self.size, items, self.hash_count)
    }
}

/// Type-state marker: nothing set.
pub struct Initial;

/// Type-state marker: size set.
pub struct WithSize;

/// Type-state marker: size and hash count set.
pub struct Complete;

/// Type-state builder for [`Filter`].
///
/// # Type Parameters
///
/// - `State`: builder state (`Initial`, `WithSize`, `Complete`)
/// - `H`: hash function (defaults to [`XxHasher`])
pub struct FilterBuilder<State, H = XxHasher> {
    size: usize,
    hash_count: u32,
    hasher: H,
    _state: PhantomData<State>,
}

impl FilterBuilder<Initial, XxHasher> {
    /// Start a builder with the default hasher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            size: 0,
            hash_count: 0,
            hasher: XxHasher::new(),
            _state: PhantomData,
        }
    }
}

impl Default for FilterBuilder<Initial, XxHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterBuilder<Complete, XxHasher> {
    /// Builder pre-filled from `config`. Validation happens at `build`.
    #[must_use]
    pub fn from_config(config: FilterConfig) -> Self {
        Self {
            size: config.size,
            hash_count: config.hash_count,
            hasher: XxHasher::new(),
            _state: PhantomData,
        }
    }
}

impl<State, H> FilterBuilder<State, H> {
    /// Replace the hasher.
    #[must_use]
    pub fn hasher<H2: BloomHasher>(self, hasher: H2) -> FilterBuilder<State, H2> {
        FilterBuilder {
            size: self.size,
            hash_count: self.hash_count,
            hasher,
            _state: PhantomData,
        }
    }
}

impl<H> FilterBuilder<Initial, H> {
    /// Set the slot count. Transitions to `WithSize`.
    #[must_use]
    pub fn size(self, size: usize) -> FilterBuilder<WithSize, H> {
        FilterBuilder {
            size,
            hash_count: self.hash_count,
            hasher: self.hasher,
            _state: PhantomData,
        }
    }
}

impl<H> FilterBuilder<WithSize, H> {
    /// Set the digests per entry. Transitions to `Complete`.
    #[must_use]
    pub fn hash_count(self, hash_count: u32) -> FilterBuilder<Complete, H> {
        FilterBuilder {
            size: self.size,
            hash_count,
            hasher: self.hasher,
            _state: PhantomData,
        }
    }
}

impl<H: BloomHasher> FilterBuilder<Complete, H> {
    /// The configured shape.
    #[must_use]
    pub fn config(&self) -> FilterConfig {
        FilterConfig::new(self.size, self.hash_count)
    }

    /// Build a filter with slot layout `S`.
    ///
    /// # Errors
    ///
    /// Any error [`Filter::with_hasher`] can return.
    pub fn build<S: SlotStore>(self) -> Result<Filter<S, H>> {
        Filter::with_hasher(self.size, self.hash_count, self.hasher)
    }
}
