//! Storage backend trait definition.

use crate::error::{StorageError, StorageResult};
use std::ops::Range;

/// A low-level storage backend for a single record file.
///
/// Storage backends are **opaque byte stores**. The record stores in
/// `depotmap_core` interpret the bytes; backends only move them.
///
/// # Invariants
///
/// - `write_at` never changes the bytes outside `offset..offset + data.len()`
/// - `read_at` returns exactly the bytes previously written at that offset
/// - `size` of storage that was never written is 0
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync {
    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The read would extend beyond the current size
    /// - The underlying file does not exist
    /// - An I/O error occurs
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>>;

    /// Reads the whole storage in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::NotFound`] if the underlying file does
    /// not exist, or any other error if reading fails.
    fn read_all(&self) -> StorageResult<Vec<u8>>;

    /// Overwrites bytes at `offset`, extending the storage if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or the following close fails.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()>;

    /// Returns the current size of the storage in bytes.
    ///
    /// A record written at this offset extends the storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Truncates the storage to the given size.
    ///
    /// Truncating a file that does not exist yet creates it empty.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The truncation fails
    /// - `new_size` is greater than current size
    fn truncate(&mut self, new_size: u64) -> StorageResult<()>;
}

/// Validates a read of `len` bytes at `offset` against `size`.
pub(crate) fn read_range(offset: u64, len: usize, size: u64) -> StorageResult<Range<usize>> {
    match offset.checked_add(len as u64) {
        Some(end) if end <= size => Ok(offset as usize..end as usize),
        _ => Err(StorageError::ReadPastEnd { offset, len, size }),
    }
}

/// Validates a `truncate` request; storage never grows through it.
pub(crate) fn check_truncate(requested: u64, size: u64) -> StorageResult<()> {
    if requested > size {
        return Err(StorageError::TruncateBeyondEnd { requested, size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_range_bounds() {
        assert_eq!(read_range(13, 13, 26).unwrap(), 13..26);
        assert_eq!(read_range(26, 0, 26).unwrap(), 26..26);
        assert!(matches!(
            read_range(20, 13, 26),
            Err(StorageError::ReadPastEnd { offset: 20, len: 13, size: 26 })
        ));
        assert!(read_range(u64::MAX, 2, 26).is_err());
    }

    #[test]
    fn truncate_never_grows() {
        assert!(check_truncate(0, 33).is_ok());
        assert!(matches!(
            check_truncate(34, 33),
            Err(StorageError::TruncateBeyondEnd { requested: 34, size: 33 })
        ));
    }
}
