//! Core filter types.
//!
//! # Module Organization
//!
//! ```text
//! core/
//! ├── slots.rs     - SlotStore trait, packed and aligned layouts
//! ├── filter.rs    - Filter<S, H> and its operations
//! ├── params.rs    - Shape validation and false-positive estimates
//! └── mod.rs       - This file (public API)
//! ```
//!
//! Filter logic is written once against [`SlotStore`]; the two layouts only
//! decide how a slot is laid out in memory and on disk.

pub mod filter;
pub mod params;
pub mod slots;

pub use filter::{AlignedByteFilter, Filter, PackedBitFilter};
pub use params::{expected_fp_rate, validate, MIN_SIZE};
pub use slots::{AlignedBytes, PackedBits, SlotStore, Strategy};
