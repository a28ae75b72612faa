//! Bit manipulation helpers for the packed slot layout.
//!
//! All functions are `const` and compile to one or two instructions. The
//! packed layout stores slot `i` in word `i >> 6` at bit `i & 63`:
//!
//! ```text
//! Word 0: [slot 0][slot 1]...[slot 63]
//! Word 1: [slot 64][slot 65]...[slot 127]
//! ```

#![allow(clippy::cast_possible_truncation)]

/// Check whether `n` is a power of two. Zero is not.
///
/// # Examples
///
/// ```
/// use bloomslot::util::bitops::is_power_of_two;
///
/// assert!(is_power_of_two(64));
/// assert!(is_power_of_two(1 << 20));
/// assert!(!is_power_of_two(0));
/// assert!(!is_power_of_two(100_000));
/// ```
#[inline(always)]
#[must_use]
pub const fn is_power_of_two(n: u64) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// Number of 64-bit words needed to hold `n_bits` bits.
///
/// ```
/// use bloomslot::util::bitops::bits_to_words;
///
/// assert_eq!(bits_to_words(64), 1);
/// assert_eq!(bits_to_words(65), 2);
/// ```
#[inline]
#[must_use]
pub const fn bits_to_words(n_bits: usize) -> usize {
    (n_bits + 63) / 64
}

/// Index of the word holding `bit_index`.
#[inline(always)]
#[must_use]
pub const fn word_index(bit_index: usize) -> usize {
    bit_index >> 6
}

/// Single-bit mask for `bit_index` within its word.
///
/// ```
/// use bloomslot::util::bitops::bit_mask;
///
/// assert_eq!(bit_mask(0), 1);
/// assert_eq!(bit_mask(65), 0b10);
/// assert_eq!(bit_mask(63), 1u64 << 63);
/// ```
#[inline(always)]
#[must_use]
pub const fn bit_mask(bit_index: usize) -> u64 {
    1u64 << (bit_index & 63)
}

/// Fold a 64-bit digest into `[0, size)` with a mask.
///
/// `size` must be a power of two; the result is `digest & (size - 1)`.
///
/// ```
/// use bloomslot::util::bitops::fold;
///
/// assert_eq!(fold(0xFFFF_FFFF_FFFF_FFFF, 1024), 1023);
/// assert_eq!(fold(1024, 1024), 0);
/// ```
#[inline(always)]
#[must_use]
pub const fn fold(digest: u64, size: usize) -> usize {
    debug_assert!(is_power_of_two(size as u64));
    (digest & (size as u64 - 1)) as usize
}
