//! Slot storage strategies.
//!
//! A filter's logical state is `size` slots, each either marked or clear.
//! [`SlotStore`] is the capability every storage layout provides; filter
//! logic, persistence, and merge are written once against it.
//!
//! # Layouts
//!
//! | Strategy            | Type             | Physical slot | Memory for `size` slots |
//! |---------------------|------------------|---------------|-------------------------|
//! | [`Strategy::Packed`]  | [`PackedBits`]   | 1 bit         | `size / 8` bytes        |
//! | [`Strategy::Aligned`] | [`AlignedBytes`] | 1 byte (0/1)  | `size` bytes            |
//!
//! Packed storage keeps slot `i` in word `i / 64` at bit `i % 64`. Aligned
//! storage spends a whole byte per slot for shift-free access.
//!
//! # Wire Form
//!
//! Both layouts serialize their raw payload with [`SlotStore::write_slots`]:
//! packed words as little-endian `u64`s, aligned slots as one byte each.

use crate::error::{BloomError, Result};
use crate::util::bitops::{bit_mask, bits_to_words, word_index};
use std::io::{Read, Write};

/// Bytes moved per read/write call when streaming slot payloads.
const IO_CHUNK_BYTES: usize = 8192;

/// Words moved per read/write call when streaming packed storage.
const IO_CHUNK_WORDS: usize = IO_CHUNK_BYTES / 8;

/// Storage layout discriminator, persisted in the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// One bit per slot, packed into 64-bit words.
    Packed,
    /// One byte per slot.
    Aligned,
}

impl Strategy {
    /// Tag byte written to the persisted header.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Packed => 0,
            Self::Aligned => 1,
        }
    }

    /// Inverse of [`tag`](Self::tag).
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Packed),
            1 => Some(Self::Aligned),
            _ => None,
        }
    }

    /// Short name for logs and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Packed => "packed",
            Self::Aligned => "aligned",
        }
    }

    /// Length in bytes of the persisted slot payload for `size` slots.
    #[must_use]
    pub const fn payload_len(self, size: usize) -> usize {
        match self {
            Self::Packed => bits_to_words(size) * 8,
            Self::Aligned => size,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Slot-width capability shared by every storage layout.
///
/// Indices passed to [`set`](Self::set) and [`get`](Self::get) must be below
/// [`len`](Self::len); the filter checks bounds before calling in, and the
/// implementations panic like slice indexing if that contract is broken.
///
/// Marks are monotonic: no method clears a slot.
pub trait SlotStore: Clone + Send + Sync + Sized {
    /// Layout tag for this implementation.
    const STRATEGY: Strategy;

    /// Allocate `size` clear slots.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the backing buffer cannot be reserved.
    fn zeroed(size: usize) -> Result<Self>;

    /// Number of logical slots.
    fn len(&self) -> usize;

    /// Always `false` for a successfully allocated store.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark slot `index`. Marking an already marked slot is a no-op.
    fn set(&mut self, index: usize);

    /// Whether slot `index` is marked.
    fn get(&self, index: usize) -> bool;

    /// Slot-wise OR of `other` into `self`. Both must have the same `len`.
    fn union_with(&mut self, other: &Self);

    /// Number of marked slots.
    fn count_ones(&self) -> usize;

    /// Bytes of heap storage held.
    fn memory_usage(&self) -> usize;

    /// Write the raw slot payload.
    ///
    /// # Errors
    ///
    /// Propagates any error from `writer`.
    fn write_slots<W: Write>(&self, writer: &mut W) -> std::io::Result<()>;

    /// Build `size` slots from exactly one payload read from `reader`.
    ///
    /// Storage grows chunk by chunk as bytes arrive, so a stream that ends
    /// early fails before the full size is ever allocated.
    ///
    /// # Errors
    ///
    /// `Io` on a short or failed read, `AllocationFailure` if storage cannot
    /// grow, `InvalidFormat` if the payload holds values the layout cannot
    /// represent.
    fn read_slots<R: Read>(size: usize, reader: &mut R) -> Result<Self>;
}

fn zeroed_boxed<T: Copy + Default>(len: usize) -> Result<Box<[T]>> {
    let bytes = len.saturating_mul(std::mem::size_of::<T>());
    // Capacity check only; the zeroed buffer comes straight from the allocator.
    Vec::<T>::new()
        .try_reserve_exact(len)
        .map_err(|_| BloomError::allocation_failure(bytes))?;
    Ok(vec![T::default(); len].into_boxed_slice())
}

/// Read `count` little-endian values of `WIDTH` bytes each.
fn read_chunked<T, R: Read, const WIDTH: usize>(
    reader: &mut R,
    count: usize,
    decode: impl Fn([u8; WIDTH]) -> T,
) -> Result<Vec<T>> {
    let mut out = Vec::new();
    let mut buf = [0u8; IO_CHUNK_BYTES];
    let per_chunk = IO_CHUNK_BYTES / WIDTH;

    while out.len() < count {
        let n = per_chunk.min(count - out.len());
        let bytes = &mut buf[..n * WIDTH];
        reader.read_exact(bytes)?;

        out.try_reserve(n)
            .map_err(|_| BloomError::allocation_failure(count.saturating_mul(WIDTH)))?;
        out.extend(bytes.chunks_exact(WIDTH).map(|src| {
            let mut raw = [0u8; WIDTH];
            raw.copy_from_slice(src);
            decode(raw)
        }));
    }
    Ok(out)
}

/// Bit-packed storage: one bit per slot in 64-bit words.
///
/// # Examples
///
/// ```
/// use bloomslot::core::{PackedBits, SlotStore};
///
/// let mut bits = PackedBits::zeroed(128).unwrap();
/// bits.set(100);
/// assert!(bits.get(100));
/// assert!(!bits.get(101));
/// assert_eq!(bits.words().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    words: Box<[u64]>,
    len: usize,
}

impl PackedBits {
    /// The backing words.
    #[must_use]
    pub fn words(&self) -> &[u64] {
        &self.words
    }
}

impl SlotStore for PackedBits {
    const STRATEGY: Strategy = Strategy::Packed;

    fn zeroed(size: usize) -> Result<Self> {
        Ok(Self {
            words: zeroed_boxed(bits_to_words(size))?,
            len: size,
        })
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn set(&mut self, index: usize) {
        debug_assert!(index < self.len, "slot {index} >= {}", self.len);
        self.words[word_index(index)] |= bit_mask(index);
    }

    #[inline]
    fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "slot {index} >= {}", self.len);
        self.words[word_index(index)] & bit_mask(index) != 0
    }

    fn union_with(&mut self, other: &Self) {
        debug_assert_eq!(self.len, other.len);
        for (dst, src) in self.words.iter_mut().zip(other.words.iter()) {
            *dst |= *src;
        }
    }

    fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    fn memory_usage(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }

    fn write_slots<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut buf = [0u8; IO_CHUNK_WORDS * 8];
        for chunk in self.words.chunks(IO_CHUNK_WORDS) {
            let bytes = &mut buf[..chunk.len() * 8];
            for (dst, word) in bytes.chunks_exact_mut(8).zip(chunk) {
                dst.copy_from_slice(&word.to_le_bytes());
            }
            writer.write_all(bytes)?;
        }
        Ok(())
    }

    fn read_slots<R: Read>(size: usize, reader: &mut R) -> Result<Self> {
        let words = read_chunked(reader, bits_to_words(size), u64::from_le_bytes)?;
        Ok(Self {
            words: words.into_boxed_slice(),
            len: size,
        })
    }
}

/// Byte-aligned storage: one byte per slot, holding `0` or `1`.
///
/// # Examples
///
/// ```
/// use bloomslot::core::{AlignedBytes, SlotStore};
///
/// let mut bytes = AlignedBytes::zeroed(64).unwrap();
/// bytes.set(63);
/// assert!(bytes.get(63));
/// assert_eq!(bytes.as_slice()[63], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedBytes {
    bytes: Box<[u8]>,
}

impl AlignedBytes {
    /// The backing bytes, one per slot.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl SlotStore for AlignedBytes {
    const STRATEGY: Strategy = Strategy::Aligned;

    fn zeroed(size: usize) -> Result<Self> {
        Ok(Self {
            bytes: zeroed_boxed(size)?,
        })
    }

    #[inline]
    fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    fn set(&mut self, index: usize) {
        self.bytes[index] = 1;
    }

    #[inline]
    fn get(&self, index: usize) -> bool {
        self.bytes[index] != 0
    }

    fn union_with(&mut self, other: &Self) {
        debug_assert_eq!(self.bytes.len(), other.bytes.len());
        for (dst, src) in self.bytes.iter_mut().zip(other.bytes.iter()) {
            *dst |= *src;
        }
    }

    fn count_ones(&self) -> usize {
        self.bytes.iter().filter(|&&b| b != 0).count()
    }

    fn memory_usage(&self) -> usize {
        self.bytes.len()
    }

    fn write_slots<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.bytes)
    }

    fn read_slots<R: Read>(size: usize, reader: &mut R) -> Result<Self> {
        let bytes = read_chunked(reader, size, |[b]: [u8; 1]| b)?;
        if let Some(pos) = bytes.iter().position(|&b| b > 1) {
            return Err(BloomError::invalid_format(format!(
                "aligned slot {pos} holds {} (expected 0 or 1)",
                bytes[pos]
            )));
        }
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
        })
    }
}
