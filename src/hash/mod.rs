//! Hashing for slot index derivation.
//!
//! ```text
//! hash/
//! ├── hasher.rs  - BloomHasher trait
//! ├── xxhash.rs  - XXH64 implementation
//! ├── scheme.rs  - HashScheme: k seeded digests + fold
//! └── mod.rs     - This file
//! ```
//!
//! # Quick Start
//!
//! ```
//! use bloomslot::hash::HashScheme;
//!
//! let scheme = HashScheme::new(4);
//! let slots = scheme.indices(b"entry", 1 << 16).unwrap();
//! assert!(slots.iter().all(|&i| i < 1 << 16));
//! ```

pub mod hasher;
pub mod scheme;
pub mod xxhash;

pub use hasher::BloomHasher;
pub use scheme::HashScheme;
pub use xxhash::XxHasher;
