//! Fixed 20-byte header preceding every persisted slot array.

use super::{FORMAT_VERSION, HEADER_LEN, MAGIC};
use crate::core::params;
use crate::core::Strategy;
use crate::error::{BloomError, Result};
use std::io::{Read, Write};
use tracing::warn;

/// Decoded filter header.
///
/// Decoding validates everything the header alone can prove: magic,
/// version, strategy tag, reserved bytes, size, and hash count. The size and
/// hash count go through the same checks as [`Filter::new`](crate::Filter::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Slot layout of the payload that follows.
    pub strategy: Strategy,
    /// Logical slot count.
    pub size: usize,
    /// Digests per entry.
    pub hash_count: u32,
}

impl Header {
    /// Encode into the on-disk byte layout.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];

        bytes[0..4].copy_from_slice(MAGIC);
        bytes[4] = FORMAT_VERSION;
        bytes[5] = self.strategy.tag();
        // bytes[6..8] reserved, left zero
        bytes[8..16].copy_from_slice(&(self.size as u64).to_le_bytes());
        // hash_count never exceeds i32::MAX once validated
        #[allow(clippy::cast_possible_wrap)]
        let k = self.hash_count as i32;
        bytes[16..20].copy_from_slice(&k.to_le_bytes());

        bytes
    }

    /// Decode and validate a header.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` for bad magic, unknown version, unknown strategy tag,
    ///   or non-zero reserved bytes
    /// - `InvalidSize` / `NotPowerOfTwo` for a bad size
    /// - `InvalidHashCount` for a zero or negative hash count
    pub fn from_bytes(bytes: &[u8; HEADER_LEN]) -> Result<Self> {
        if &bytes[0..4] != MAGIC {
            return Err(reject(BloomError::invalid_format(format!(
                "bad magic {:02x?} (expected {:?})",
                &bytes[0..4],
                String::from_utf8_lossy(MAGIC)
            ))));
        }

        if bytes[4] != FORMAT_VERSION {
            return Err(reject(BloomError::invalid_format(format!(
                "unsupported format version {} (expected {})",
                bytes[4], FORMAT_VERSION
            ))));
        }

        let strategy = Strategy::from_tag(bytes[5]).ok_or_else(|| {
            reject(BloomError::invalid_format(format!(
                "unknown strategy tag {}",
                bytes[5]
            )))
        })?;

        if bytes[6..8] != [0, 0] {
            return Err(reject(BloomError::invalid_format(
                "reserved header bytes are not zero",
            )));
        }

        let size = u64::from_le_bytes(read_array(&bytes[8..16]));
        params::validate_size(size).map_err(reject)?;
        let size = usize::try_from(size).map_err(|_| {
            reject(BloomError::allocation_failure(usize::MAX))
        })?;

        let k = i32::from_le_bytes(read_array(&bytes[16..20]));
        let hash_count = params::validate_hash_count(i64::from(k)).map_err(reject)?;

        Ok(Self {
            strategy,
            size,
            hash_count,
        })
    }

    /// Write the encoded header.
    ///
    /// # Errors
    ///
    /// Propagates any error from `writer`.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Read and validate exactly one header.
    ///
    /// # Errors
    ///
    /// `Io` on a short read, otherwise as [`from_bytes`](Self::from_bytes).
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_LEN];
        reader.read_exact(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Byte length of the slot payload that follows this header.
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.strategy.payload_len(self.size)
    }
}

fn read_array<const N: usize>(src: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(src);
    out
}

fn reject(err: BloomError) -> BloomError {
    warn!(error = %err, "rejected persisted filter header");
    err
}
