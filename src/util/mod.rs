//! Internal utility functions.
//!
//! - [`bitops`] - Bit manipulation for the packed slot layout and index folding

pub mod bitops;

pub use bitops::{fold, is_power_of_two};
