//! Binary persistence and merge.
//!
//! # Format
//!
//! All integers are little-endian, independent of the host platform:
//!
//! ```text
//! [Header: 20 bytes]
//!   Magic:       4 bytes  ("BLSF")
//!   Version:     1 byte   (format version, currently 1)
//!   Strategy:    1 byte   (0 = packed, 1 = aligned)
//!   Reserved:    2 bytes  (zero)
//!   Size:        8 bytes  (u64, slot count)
//!   Hash count:  4 bytes  (i32)
//!
//! [Payload]
//!   packed:  size / 8 bytes, little-endian u64 words
//!   aligned: size bytes, each 0 or 1
//! ```
//!
//! Loading reads exactly header plus payload and leaves anything after it in
//! the source, so several filters can share one stream. The hasher is not
//! recorded; a filter must be loaded with the hasher it was written with.
//!
//! # Examples
//!
//! ```
//! use bloomslot::PackedBitFilter;
//!
//! let filter = PackedBitFilter::new(1024, 3)?;
//! filter.insert("persisted")?;
//!
//! let mut buf = Vec::new();
//! filter.write_to(&mut buf)?;
//!
//! let restored = PackedBitFilter::load_from(&mut buf.as_slice())?;
//! assert!(restored.lookup("persisted")?);
//! # Ok::<(), bloomslot::BloomError>(())
//! ```

pub mod header;
mod io;

pub use header::Header;

/// Magic bytes identifying a persisted filter.
pub const MAGIC: &[u8; 4] = b"BLSF";

/// Current format version.
pub const FORMAT_VERSION: u8 = 1;

/// Header length in bytes.
pub const HEADER_LEN: usize = 20;
