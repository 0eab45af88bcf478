//! Byte store held in memory.

use crate::backend::{check_truncate, read_range, StorageBackend};
use crate::error::StorageResult;
use parking_lot::RwLock;
use std::sync::Arc;

/// A record file kept in a shared buffer.
///
/// Clones share the buffer, so a test can give one handle to a store and
/// keep another to look at the raw records, or to load the same bytes into
/// a second store.
///
/// # Example
///
/// ```rust
/// use depotmap_storage::{InMemoryBackend, StorageBackend};
///
/// let mut houses = InMemoryBackend::new();
/// let raw = houses.clone();
/// houses.write_at(0, &[0u8; 33]).unwrap();
/// assert_eq!(raw.size().unwrap(), 33);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryBackend {
    bytes: Arc<RwLock<Vec<u8>>>,
}

impl InMemoryBackend {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing bytes, such as a hand-built record file.
    #[must_use]
    pub fn with_data(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(RwLock::new(bytes)),
        }
    }

    /// Snapshot of the buffer.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.bytes.read().to_vec()
    }
}

impl StorageBackend for InMemoryBackend {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let bytes = self.bytes.read();
        let range = read_range(offset, len, bytes.len() as u64)?;
        Ok(bytes[range].to_vec())
    }

    fn read_all(&self) -> StorageResult<Vec<u8>> {
        Ok(self.data())
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()> {
        let mut bytes = self.bytes.write();
        let start = offset as usize;
        let end = start + data.len();
        if bytes.len() < end {
            bytes.resize(end, 0);
        }
        bytes[start..end].copy_from_slice(data);
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.bytes.read().len() as u64)
    }

    fn truncate(&mut self, new_size: u64) -> StorageResult<()> {
        let mut bytes = self.bytes.write();
        check_truncate(new_size, bytes.len() as u64)?;
        bytes.truncate(new_size as usize);
        Ok(())
    }
}
