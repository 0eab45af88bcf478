//! # depotmap storage
//!
//! Byte-store backends for depotmap record files.
//!
//! This crate provides the lowest-level storage abstraction for depotmap.
//! Backends are **opaque byte stores** - they know nothing about house or
//! path records, tombstones or slots.
//!
//! ## Design Principles
//!
//! - Backends are simple byte stores (read, write in place, truncate)
//! - The record layout is owned entirely by `depotmap_core`
//! - Must be `Send + Sync`
//! - A failed close is an error, never silently dropped
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and scratch maps
//! - [`FileBackend`] - Opens, operates on, and closes a file per call
//!
//! ## Example
//!
//! ```rust
//! use depotmap_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! backend.write_at(0, b"hello world").unwrap();
//! backend.write_at(0, b"j").unwrap();
//! assert_eq!(backend.read_at(0, 5).unwrap(), b"jello");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
