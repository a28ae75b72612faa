//! Filter shape validation and false-positive estimates.
//!
//! Callers choose `(size, hash_count)` directly; this module only checks that
//! a shape is structurally valid and estimates how it will behave.
//!
//! # Mathematical Background
//!
//! For `m` slots, `k` digests per entry, and `n` inserted entries, the
//! expected false positive rate is:
//!
//! ```text
//! p = (1 - e^(-kn/m))^k
//! ```
//!
//! Beyond roughly `k = 20` extra digests cost more time than they save in
//! accuracy, but that is a tuning concern, not a structural error.
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/Time Trade-offs in Hash Coding with Allowable Errors"

#![allow(clippy::cast_precision_loss)]

use crate::error::{BloomError, Result};
use crate::util::bitops::is_power_of_two;

/// Smallest permitted filter size, in slots.
pub const MIN_SIZE: u64 = 64;

/// Largest permitted hash count. The persisted header stores it as `i32`.
pub const MAX_HASH_COUNT: u32 = i32::MAX as u32;

/// Check that `size` is at least [`MIN_SIZE`] and a power of two.
///
/// # Errors
///
/// - `InvalidSize` when `size < 64`
/// - `NotPowerOfTwo` when `size` is not a power of two
///
/// # Examples
///
/// ```
/// use bloomslot::core::params::validate_size;
/// use bloomslot::BloomError;
///
/// assert!(validate_size(1 << 20).is_ok());
/// assert!(matches!(validate_size(32), Err(BloomError::InvalidSize { .. })));
/// assert!(matches!(validate_size(100_000), Err(BloomError::NotPowerOfTwo { .. })));
/// ```
pub fn validate_size(size: u64) -> Result<()> {
    if size < MIN_SIZE {
        return Err(BloomError::InvalidSize { size });
    }
    if !is_power_of_two(size) {
        return Err(BloomError::NotPowerOfTwo { size });
    }
    Ok(())
}

/// Check a hash count, accepting the signed form stored on disk.
///
/// # Errors
///
/// `InvalidHashCount` when `count` is zero, negative, or above [`MAX_HASH_COUNT`].
pub fn validate_hash_count(count: i64) -> Result<u32> {
    match u32::try_from(count) {
        Ok(k) if k >= 1 && k <= MAX_HASH_COUNT => Ok(k),
        _ => Err(BloomError::InvalidHashCount { count }),
    }
}

/// Validate a full `(size, hash_count)` shape.
///
/// # Errors
///
/// Any error from [`validate_size`] or [`validate_hash_count`], size first.
pub fn validate(size: usize, hash_count: u32) -> Result<()> {
    validate_size(size as u64)?;
    validate_hash_count(i64::from(hash_count))?;
    Ok(())
}

/// Expected false positive rate after `n` insertions: `(1 - e^(-kn/m))^k`.
///
/// Returns `0.0` for `n == 0` or `m == 0`.
///
/// # Examples
///
/// ```
/// use bloomslot::core::params::expected_fp_rate;
///
/// let p = expected_fp_rate(1 << 20, 100_000, 7);
/// assert!(p > 0.0 && p < 0.01);
/// assert_eq!(expected_fp_rate(1024, 0, 4), 0.0);
/// ```
#[must_use]
pub fn expected_fp_rate(m: usize, n: usize, k: u32) -> f64 {
    if m == 0 || n == 0 {
        return 0.0;
    }

    let k_f64 = f64::from(k);
    let exponent = -(k_f64 * n as f64) / m as f64;
    let prob_slot_marked = 1.0 - exponent.exp();

    prob_slot_marked.powf(k_f64).clamp(0.0, 1.0)
}

/// False positive rate implied by an observed fill ratio: `fill^k`.
#[must_use]
pub fn fp_rate_from_fill(fill_ratio: f64, k: u32) -> f64 {
    fill_ratio.clamp(0.0, 1.0).powf(f64::from(k))
}
