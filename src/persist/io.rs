//! Write, load, and merge over `std::io` streams and file paths.

use super::header::Header;
use super::HEADER_LEN;
use crate::core::{Filter, SlotStore};
use crate::error::{BloomError, Result};
use crate::hash::{BloomHasher, HashScheme, XxHasher};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Read one header and its payload, requiring layout `S`.
fn read_parts<S: SlotStore, R: Read>(reader: &mut R) -> Result<(Header, S)> {
    let header = Header::read(reader)?;
    if header.strategy != S::STRATEGY {
        warn!(
            expected = %S::STRATEGY,
            found = %header.strategy,
            "persisted filter has a different slot layout"
        );
        return Err(BloomError::invalid_format(format!(
            "expected {} filter, found {}",
            S::STRATEGY,
            header.strategy
        )));
    }

    let store = S::read_slots(header.size, reader)?;
    Ok((header, store))
}

impl<S: SlotStore, H: BloomHasher> Filter<S, H> {
    /// Write the header and slot array to `writer`.
    ///
    /// The slots are written under shared access, so the output is a
    /// consistent snapshot even while other threads insert.
    ///
    /// # Errors
    ///
    /// `Io` if the writer fails; a partial stream may have been written.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let header = self.write_unlogged(writer)?;
        info!(
            bytes = HEADER_LEN + header.payload_len(),
            size = header.size,
            hash_count = header.hash_count,
            strategy = %header.strategy,
            "wrote filter"
        );
        Ok(())
    }

    /// Create (or truncate) the file at `path` and write the filter to it.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be created or written.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let header = self.write_unlogged(BufWriter::new(file))?;
        info!(
            path = %path.display(),
            bytes = HEADER_LEN + header.payload_len(),
            size = header.size,
            hash_count = header.hash_count,
            strategy = %header.strategy,
            "wrote filter"
        );
        Ok(())
    }

    fn write_unlogged<W: Write>(&self, mut writer: W) -> Result<Header> {
        let header = Header {
            strategy: S::STRATEGY,
            size: self.size(),
            hash_count: self.hash_count(),
        };
        header.write(&mut writer)?;
        self.with_slots(|store| store.write_slots(&mut writer))?;
        writer.flush()?;
        Ok(header)
    }

    /// Load a filter from `reader` using `hasher` for future inserts and lookups.
    ///
    /// Reads exactly one header and payload; bytes after the payload are left
    /// in the reader.
    ///
    /// # Errors
    ///
    /// - `Io` on a short or failed read
    /// - `InvalidFormat` for a bad header or a payload of the other layout
    /// - `InvalidSize`, `NotPowerOfTwo`, `InvalidHashCount` for bad parameters
    /// - `AllocationFailure` if slot storage cannot be allocated
    pub fn load_from_with_hasher<R: Read>(mut reader: R, hasher: H) -> Result<Self> {
        let (header, store) = read_parts::<S, _>(&mut reader)?;

        info!(
            size = header.size,
            hash_count = header.hash_count,
            strategy = %header.strategy,
            "loaded filter"
        );
        Ok(Self::from_store(
            store,
            HashScheme::with_hasher(header.hash_count, hasher),
        ))
    }

    /// OR a persisted filter from `reader` into this one.
    ///
    /// The source is read and validated in full before this filter is
    /// touched, then folded in under one exclusive section. Merging the same
    /// source twice leaves the slots as after the first merge.
    ///
    /// # Errors
    ///
    /// - `ParameterMismatch` if the source's size or hash count differ
    /// - any error [`load_from`](Self::load_from) can return
    ///
    /// On error this filter is unmodified.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomslot::AlignedByteFilter;
    ///
    /// let remote = AlignedByteFilter::new(1024, 3)?;
    /// remote.insert("remote-entry")?;
    /// let mut buf = Vec::new();
    /// remote.write_to(&mut buf)?;
    ///
    /// let local = AlignedByteFilter::new(1024, 3)?;
    /// local.insert("local-entry")?;
    /// local.merge_from(buf.as_slice())?;
    ///
    /// assert!(local.lookup("remote-entry")?);
    /// assert!(local.lookup("local-entry")?);
    /// # Ok::<(), bloomslot::BloomError>(())
    /// ```
    pub fn merge_from<R: Read>(&self, mut reader: R) -> Result<()> {
        let (header, source) = read_parts::<S, _>(&mut reader)?;
        self.ensure_shape(header.size, header.hash_count)?;
        self.absorb(&source);

        info!(
            size = header.size,
            hash_count = header.hash_count,
            strategy = %header.strategy,
            "merged filter"
        );
        Ok(())
    }

    /// [`merge_from`](Self::merge_from) a file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be opened, otherwise as `merge_from`.
    pub fn merge_from_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::open(path.as_ref())?;
        self.merge_from(BufReader::new(file))
    }
}

impl<S: SlotStore> Filter<S, XxHasher> {
    /// Load a filter from `reader` with the default XXH64 hasher.
    ///
    /// # Errors
    ///
    /// See [`load_from_with_hasher`](Self::load_from_with_hasher).
    pub fn load_from<R: Read>(reader: R) -> Result<Self> {
        Self::load_from_with_hasher(reader, XxHasher::new())
    }

    /// Load a filter from the file at `path`.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be opened, otherwise as `load_from`.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::load_from(BufReader::new(file))
    }
}
