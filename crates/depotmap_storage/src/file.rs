//! Record files on disk.

use crate::backend::{check_truncate, read_range, StorageBackend};
use crate::error::{StorageError, StorageResult};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A record file on disk.
///
/// Only the path is kept. Each call opens the file, seeks, reads or writes,
/// and closes it before returning, so the map files are never held open
/// between edits.
///
/// Closing after a write runs `sync_all`. If that fails the call returns
/// [`StorageError::Close`], even though the bytes were handed to the OS.
///
/// # Example
///
/// ```no_run
/// use depotmap_storage::{FileBackend, StorageBackend};
/// use std::path::Path;
///
/// let mut paths = FileBackend::new(Path::new("town.mpp"));
/// let end = paths.size().unwrap();
/// paths.write_at(end, &[0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 5]).unwrap();
/// paths.write_at(end, &[1]).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Backend for the file at `path`.
    ///
    /// Nothing is opened here. Until something is written, a missing file
    /// has size 0.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Like [`FileBackend::new`], but first creates the parent directories.
    ///
    /// # Errors
    ///
    /// Fails if a directory cannot be created.
    pub fn with_create_dirs(path: &Path) -> StorageResult<Self> {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)?,
            _ => {}
        }
        Ok(Self::new(path))
    }

    /// The file this backend reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the file is on disk.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn open(&self, write: bool) -> StorageResult<File> {
        let mut options = OpenOptions::new();
        options.read(true);
        if write {
            options.write(true).create(true).truncate(false);
        }
        options.open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound {
                path: self.path.clone(),
            },
            _ => StorageError::Io(e),
        })
    }

    fn close(&self, mut file: File) -> StorageResult<()> {
        let closed = file.flush().and_then(|()| file.sync_all());
        closed.map_err(|source| StorageError::Close {
            path: self.path.clone(),
            source,
        })
    }
}

impl StorageBackend for FileBackend {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let range = read_range(offset, len, self.size()?)?;
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let mut file = self.open(false)?;
        file.seek(SeekFrom::Start(offset))?;
        let mut record = vec![0u8; range.len()];
        file.read_exact(&mut record)?;
        Ok(record)
    }

    fn read_all(&self) -> StorageResult<Vec<u8>> {
        let mut contents = Vec::new();
        self.open(false)?.read_to_end(&mut contents)?;
        Ok(contents)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()> {
        let mut file = self.open(true)?;
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(data)?;
        self.close(file)
    }

    fn size(&self) -> StorageResult<u64> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn truncate(&mut self, new_size: u64) -> StorageResult<()> {
        check_truncate(new_size, self.size()?)?;
        let file = self.open(true)?;
        file.set_len(new_size)?;
        self.close(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn backend(name: &str) -> (TempDir, FileBackend) {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(&dir.path().join(name));
        (dir, backend)
    }

    #[test]
    fn absent_file_has_no_slots() {
        let (_dir, backend) = backend("town.mph");
        assert_eq!(backend.size().unwrap(), 0);
        assert!(!backend.exists());
    }

    #[test]
    fn absent_file_reads_as_not_found() {
        let (_dir, backend) = backend("town.mpp");
        let err = backend.read_all().unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, StorageError::NotFound { ref path } if path == backend.path()));
    }

    #[test]
    fn records_at_end_read_back() {
        let (_dir, mut backend) = backend("town.mpp");
        backend.write_at(0, &[0; 13]).unwrap();
        let end = backend.size().unwrap();
        backend.write_at(end, &[0, 9, 9]).unwrap();

        assert_eq!(backend.size().unwrap(), 16);
        assert_eq!(backend.read_at(13, 3).unwrap(), vec![0, 9, 9]);
    }

    #[test]
    fn tombstone_write_touches_one_byte() {
        let (_dir, mut backend) = backend("town.mph");
        backend.write_at(0, b"\x00first\x00second").unwrap();
        backend.write_at(6, &[1]).unwrap();

        assert_eq!(backend.read_all().unwrap(), b"\x00first\x01second");
    }

    #[test]
    fn write_past_end_zero_fills() {
        let (_dir, mut backend) = backend("town.mph");
        backend.write_at(3, &[7, 7]).unwrap();
        assert_eq!(backend.read_all().unwrap(), vec![0, 0, 0, 7, 7]);
    }

    #[test]
    fn read_past_end_fails() {
        let (_dir, mut backend) = backend("town.mpp");
        backend.write_at(0, &[0; 13]).unwrap();
        assert_eq!(backend.read_at(0, 1).unwrap(), vec![0]);
        let err = backend.read_at(13, 13).unwrap_err();
        assert!(matches!(err, StorageError::ReadPastEnd { offset: 13, .. }));
    }

    #[test]
    fn data_outlives_backend() {
        let (dir, mut first) = backend("town.mph");
        first.write_at(0, b"kept").unwrap();
        drop(first);

        let second = FileBackend::new(&dir.path().join("town.mph"));
        assert_eq!(second.read_at(0, 4).unwrap(), b"kept");
    }

    #[test]
    fn truncate_to_zero_creates_file() {
        let (_dir, mut backend) = backend("town.mph");
        backend.truncate(0).unwrap();
        assert!(backend.exists());

        backend.write_at(0, &[1; 26]).unwrap();
        backend.truncate(13).unwrap();
        assert_eq!(backend.size().unwrap(), 13);
        assert!(matches!(
            backend.truncate(14),
            Err(StorageError::TruncateBeyondEnd { requested: 14, size: 13 })
        ));
    }

    #[test]
    fn create_dirs_for_nested_map() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("maps").join("north").join("town.mph");

        let mut backend = FileBackend::with_create_dirs(&path).unwrap();
        backend.write_at(0, &[0]).unwrap();
        assert!(path.is_file());
        assert_eq!(backend.path(), path);
    }
}
