//! bloomslot: fixed-size, thread-safe Bloom filters with binary persistence.
//!
//! A Bloom filter answers "have I seen this entry?" in constant time and
//! fixed memory. It can produce:
//! - **False positives**: may say an entry is present when it isn't
//! - **Zero false negatives**: if it says an entry is absent, it definitely is
//!
//! # Quick Start
//!
//! ```
//! use bloomslot::PackedBitFilter;
//!
//! // 2^20 slots, 4 digests per entry
//! let filter = PackedBitFilter::new(1 << 20, 4)?;
//!
//! filter.insert("hello")?;
//! filter.insert("world")?;
//!
//! assert!(filter.lookup("hello")?);    // possibly present
//! assert!(!filter.lookup("goodbye")?); // definitely absent
//! # Ok::<(), bloomslot::BloomError>(())
//! ```
//!
//! # Slot Layouts
//!
//! | Filter                | Slot    | Memory for 2^20 slots |
//! |-----------------------|---------|-----------------------|
//! | [`PackedBitFilter`]   | 1 bit   | 128 KiB               |
//! | [`AlignedByteFilter`] | 1 byte  | 1 MiB                 |
//!
//! Both expose the same operations; they are [`Filter`] instantiated over
//! [`PackedBits`] and [`AlignedBytes`].
//!
//! # Concurrency
//!
//! Every `&self` operation is synchronized by a reader/writer lock owned by
//! the filter, so a filter can be shared through `Arc` with no extra
//! wrapping. The `*_unsynced` variants take `&mut self` and skip the lock.
//!
//! ```
//! use bloomslot::AlignedByteFilter;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let filter = Arc::new(AlignedByteFilter::new(1 << 16, 4).unwrap());
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let filter = Arc::clone(&filter);
//!         thread::spawn(move || filter.insert(format!("thread-{t}")).unwrap())
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//! assert!(filter.lookup("thread-2").unwrap());
//! ```
//!
//! # Persistence and Merge
//!
//! Filters write to and load from any `std::io` stream in a fixed
//! little-endian format, and a persisted filter can be OR-ed into a live
//! one of the same shape:
//!
//! ```
//! use bloomslot::PackedBitFilter;
//!
//! let shard = PackedBitFilter::new(4096, 3)?;
//! shard.insert("from-shard")?;
//! let mut bytes = Vec::new();
//! shard.write_to(&mut bytes)?;
//!
//! let combined = PackedBitFilter::new(4096, 3)?;
//! combined.merge_from(bytes.as_slice())?;
//! assert!(combined.lookup("from-shard")?);
//! # Ok::<(), bloomslot::BloomError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for filters and [`FilterConfig`]
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber. Filter
//! creation logs at `debug`; write, load, and merge log at `info`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::manual_range_contains)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_root_url = "https://docs.rs/bloomslot/0.1.0")]

/// Filter types, slot layouts, and shape parameters
pub mod core;

/// Error types and result aliases
pub mod error;

/// Hash functions and the k-digest scheme
pub mod hash;

/// Utility functions and helpers
pub mod util;

/// Reader/writer guard over slot storage
pub mod sync;

/// Type-safe filter builder and config value
pub mod builder;

/// Binary persistence and merge
pub mod persist;

/// Serialization support (requires `serde` feature)
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod serde_support;

pub use error::{BloomError, Result};

pub use crate::core::{
    AlignedByteFilter, AlignedBytes, Filter, PackedBitFilter, PackedBits, SlotStore, Strategy,
};

pub use builder::{FilterBuilder, FilterConfig};

pub use hash::{BloomHasher, HashScheme, XxHasher};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use bloomslot::prelude::*;
///
/// let filter: PackedBitFilter = FilterBuilder::new()
///     .size(1024)
///     .hash_count(3)
///     .build::<PackedBits>()?;
/// filter.insert("hello")?;
/// assert!(filter.lookup("hello")?);
/// # Ok::<(), BloomError>(())
/// ```
pub mod prelude {
    pub use crate::builder::{FilterBuilder, FilterConfig};
    pub use crate::core::{
        AlignedByteFilter, AlignedBytes, Filter, PackedBitFilter, PackedBits, SlotStore,
        Strategy,
    };
    pub use crate::error::{BloomError, Result};
    pub use crate::hash::{BloomHasher, HashScheme, XxHasher};
}
